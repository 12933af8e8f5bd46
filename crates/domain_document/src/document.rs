//! Structured case document (SED) model
//!
//! Every field the extractor reads is an explicit `Option` in a typed tree,
//! mirroring the SED JSON layout. Absent blocks deserialise to `None`;
//! unknown fields are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{parse_document_date, DocumentType};

use crate::error::DocumentError;

/// Country code marking a Norwegian pin
pub const NORWAY_PIN_COUNTRY: &str = "NO";

/// A typed case document, immutable once fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    #[serde(rename = "sed")]
    pub document_type: DocumentType,
    #[serde(default)]
    pub nav: Option<NavBlock>,
    #[serde(rename = "pensjon", default)]
    pub pension: Option<PensionBlock>,
}

/// Person and claim information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavBlock {
    /// The insured person
    #[serde(rename = "bruker", default)]
    pub insured: Option<PersonBlock>,
    /// A secondary person, such as a claimant or a debtor
    #[serde(rename = "annenperson", default)]
    pub other_person: Option<PersonBlock>,
    #[serde(rename = "krav", default)]
    pub claim: Option<ClaimBlock>,
}

/// Wrapper around a person, with optional recovery status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonBlock {
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(rename = "tilbakekreving", default)]
    pub recovery: Option<RecoveryBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub pin: Vec<Pin>,
    #[serde(rename = "fornavn", default)]
    pub first_name: Option<String>,
    #[serde(rename = "etternavn", default)]
    pub last_name: Option<String>,
    #[serde(rename = "foedselsdato", default)]
    pub birthdate: Option<String>,
    #[serde(rename = "rolle", default)]
    pub role: Option<String>,
    #[serde(rename = "relasjontilavdod", default)]
    pub relation_to_deceased: Option<RelationToDeceased>,
}

/// A country-scoped personal identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    #[serde(rename = "land", default)]
    pub country: Option<String>,
    #[serde(rename = "identifikator", default)]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimBlock {
    #[serde(rename = "type", default)]
    pub claim_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PensionBlock {
    #[serde(rename = "gjenlevende", default)]
    pub survivor: Option<PersonBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryBlock {
    #[serde(default)]
    pub status: Option<RecoveryStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryStatus {
    #[serde(rename = "type", default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationToDeceased {
    #[serde(rename = "relasjon", default)]
    pub code: Option<String>,
}

impl StructuredDocument {
    /// Creates an empty document of the given type
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            nav: None,
            pension: None,
        }
    }

    /// Deserialises a document from SED JSON
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|e| DocumentError::Malformed(e.to_string()))
    }

    /// The insured person block, if present
    pub fn insured(&self) -> Option<&PersonBlock> {
        self.nav.as_ref()?.insured.as_ref()
    }

    /// The insured person, if present
    pub fn insured_person(&self) -> Option<&Person> {
        self.insured()?.person.as_ref()
    }

    /// The secondary person block, if present
    pub fn other(&self) -> Option<&PersonBlock> {
        self.nav.as_ref()?.other_person.as_ref()
    }

    /// The secondary person, if present
    pub fn other_person(&self) -> Option<&Person> {
        self.other()?.person.as_ref()
    }

    /// Claim type code from the claim block
    pub fn claim_code(&self) -> Option<&str> {
        self.nav.as_ref()?.claim.as_ref()?.claim_type.as_deref()
    }

    /// The survivor from the pension block, if present
    pub fn survivor_person(&self) -> Option<&Person> {
        self.pension.as_ref()?.survivor.as_ref()?.person.as_ref()
    }
}

impl PersonBlock {
    /// Repayment status code for this person
    pub fn recovery_status_code(&self) -> Option<&str> {
        self.recovery.as_ref()?.status.as_ref()?.code.as_deref()
    }
}

impl Person {
    /// The Norwegian pin, trimmed
    ///
    /// A person may carry pins for several countries. When more than one
    /// Norwegian pin is listed, the last one wins.
    pub fn norwegian_pin(&self) -> Option<&str> {
        self.pin
            .iter()
            .filter(|pin| pin.country.as_deref() == Some(NORWAY_PIN_COUNTRY))
            .filter_map(|pin| pin.identifier.as_deref())
            .map(str::trim)
            .filter(|identifier| !identifier.is_empty())
            .last()
    }

    /// First and last name joined by a space, if either is present
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Birthdate as written in the document
    pub fn parsed_birthdate(&self) -> Option<NaiveDate> {
        self.birthdate.as_deref().and_then(parse_document_date)
    }

    /// Relationship-to-deceased code
    pub fn relation_to_deceased_code(&self) -> Option<&str> {
        self.relation_to_deceased.as_ref()?.code.as_deref()
    }
}
