//! Registry records and resolved persons

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ActorId, BenefitType, NationalId, RelationTag};

/// Country codes the registry uses for Norway
pub const NORWAY_COUNTRY_CODES: [&str; 2] = ["NOR", "NO"];

/// A person as returned by the person registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub actor_id: ActorId,
    pub national_id: Option<NationalId>,
    pub name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    /// Country of the registered residential address
    pub residential_country: Option<String>,
    /// Country of a contact address that overrides the residential one
    pub contact_country: Option<String>,
    /// Geographic unit (municipality or district) of the residence
    pub geographic_unit: Option<String>,
}

impl PersonRecord {
    /// Creates a minimal record for an actor
    pub fn new(actor_id: impl Into<ActorId>) -> Self {
        Self {
            actor_id: actor_id.into(),
            national_id: None,
            name: None,
            birthdate: None,
            residential_country: None,
            contact_country: None,
            geographic_unit: None,
        }
    }

    /// Country used for residency decisions
    ///
    /// A contact address country takes precedence over the residential
    /// address. Returns an empty string when neither yields a code.
    pub fn country_code(&self) -> String {
        [self.contact_country.as_deref(), self.residential_country.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|code| !code.is_empty())
            .map(str::to_uppercase)
            .unwrap_or_default()
    }
}

/// Where a resolved person lives, for routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Residency {
    Norway,
    /// Abroad or unknown
    Abroad,
}

impl Residency {
    pub fn from_country_code(code: &str) -> Self {
        if NORWAY_COUNTRY_CODES.contains(&code.trim().to_uppercase().as_str()) {
            Residency::Norway
        } else {
            Residency::Abroad
        }
    }
}

/// A person confirmed by the registry and relevant to the case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPerson {
    pub actor_id: ActorId,
    pub national_id: Option<NationalId>,
    pub relation: RelationTag,
    pub benefit_type: Option<BenefitType>,
    pub birthdate: Option<NaiveDate>,
    /// ISO country code, empty when unknown
    pub country_code: String,
    pub geographic_unit: Option<String>,
    /// Strict confidentiality applies to this person
    pub confidential: bool,
    /// Other persons in the case, filled in on the subject only
    pub related_persons: Vec<ResolvedPerson>,
}

impl ResolvedPerson {
    pub fn residency(&self) -> Residency {
        Residency::from_country_code(&self.country_code)
    }

    /// True when the actor id is present and not blank
    pub fn has_actor_id(&self) -> bool {
        !self.actor_id.is_blank()
    }
}
