//! Case type handlers
//!
//! Every handler runs the same rule skeleton:
//!
//! 1. Strict confidentiality routes to the restricted unit
//! 2. Handler-specific fixed routes
//! 3. Sent events that pass the completeness gate are journaled
//!    automatically
//! 4. Everything else is routed manually by residency and age
//!
//! The handlers only differ in their fixed routes, their automatic
//! eligibility and the age bracket of the manual fallback.

use serde::{Deserialize, Serialize};

use core_kernel::{BenefitType, DocumentType};
use domain_identity::Residency;

use crate::request::RoutingRequest;
use crate::unit::{OrganizationalUnit, RoutingDecision};

/// Lower age limit of the disability bracket
pub const MINOR_AGE: u32 = 18;

/// Age brackets for the manual fallback
///
/// Ages in `lower..upper` go to the disability units, all other ages
/// (and unknown ages) to the general units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBracket {
    pub lower: u32,
    pub upper: u32,
}

impl AgeBracket {
    pub const UP_TO_60: AgeBracket = AgeBracket::new(MINOR_AGE, 60);
    pub const UP_TO_62: AgeBracket = AgeBracket::new(MINOR_AGE, 62);

    pub const fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }

    pub fn with_lower(self, lower: u32) -> Self {
        Self { lower, ..self }
    }

    pub fn is_disability_age(&self, age: u32) -> bool {
        (self.lower..self.upper).contains(&age)
    }
}

/// Age conventions for senders with a bilateral agreement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilateralRule {
    /// Two-letter sender country codes, upper case
    pub countries: Vec<String>,
    /// Lower bracket limit used for those senders
    pub minor_age: u32,
}

impl BilateralRule {
    fn applies_to(&self, sender_country: Option<&str>) -> bool {
        sender_country.is_some_and(|sender| {
            let sender = sender.trim();
            self.countries.iter().any(|country| country.eq_ignore_ascii_case(sender))
        })
    }
}

/// Routing strategy for a group of case types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseHandler {
    /// Old-age basic flow, automatic without a benefit type
    OldAgeBasic,
    /// Survivor flow; a closed disability case goes to intake
    SurvivorFlow,
    /// Claim flows with bilateral age conventions
    BilateralClaims(BilateralRule),
    /// Pension claims, automatic only for old-age, survivor and disability
    PensionClaims,
    /// Recovery; R004 goes to finance and several persons go to intake
    Recovery,
    /// No automatic path
    ManualOnly,
}

impl CaseHandler {
    /// Decides the unit for a request
    pub fn decide(&self, request: &RoutingRequest) -> RoutingDecision {
        if request.is_confidential() {
            return RoutingDecision::manual(OrganizationalUnit::StrictConfidentiality);
        }

        if let Some(decision) = self.fixed_route(request) {
            return decision;
        }

        if request.is_sent() && self.is_automatic_eligible(request) {
            return RoutingDecision::automatic();
        }

        self.manual_fallback(request)
    }

    /// Routes that hold regardless of event type and completeness
    fn fixed_route(&self, request: &RoutingRequest) -> Option<RoutingDecision> {
        match self {
            CaseHandler::SurvivorFlow if request.has_closed_case(BenefitType::Disability) => {
                Some(RoutingDecision::manual(OrganizationalUnit::IdAndDistribution))
            }
            CaseHandler::Recovery if *request.document_type() == DocumentType::R004 => {
                Some(RoutingDecision::manual(OrganizationalUnit::FinancePension))
            }
            CaseHandler::Recovery if request.has_multiple_persons() => {
                Some(RoutingDecision::manual(OrganizationalUnit::IdAndDistribution))
            }
            _ => None,
        }
    }

    fn is_automatic_eligible(&self, request: &RoutingRequest) -> bool {
        match self {
            CaseHandler::OldAgeBasic | CaseHandler::Recovery => is_complete(request, false),
            CaseHandler::SurvivorFlow | CaseHandler::BilateralClaims(_) => is_complete(request, true),
            CaseHandler::PensionClaims => {
                let eligible_benefit = matches!(
                    request.benefit_type(),
                    Some(BenefitType::OldAge | BenefitType::Survivor | BenefitType::Disability)
                );
                eligible_benefit
                    && !request.has_closed_case(BenefitType::Disability)
                    && is_complete(request, true)
            }
            CaseHandler::ManualOnly => false,
        }
    }

    /// Age bracket of the manual fallback for this request
    pub fn age_bracket(&self, request: &RoutingRequest) -> AgeBracket {
        match self {
            CaseHandler::OldAgeBasic | CaseHandler::SurvivorFlow | CaseHandler::PensionClaims => {
                AgeBracket::UP_TO_62
            }
            CaseHandler::BilateralClaims(rule) if rule.applies_to(request.sender_country()) => {
                AgeBracket::UP_TO_60.with_lower(rule.minor_age)
            }
            CaseHandler::BilateralClaims(_) | CaseHandler::Recovery | CaseHandler::ManualOnly => {
                AgeBracket::UP_TO_60
            }
        }
    }

    fn manual_fallback(&self, request: &RoutingRequest) -> RoutingDecision {
        let bracket = self.age_bracket(request);
        let disability_age = request.age().is_some_and(|age| bracket.is_disability_age(age));

        let unit = match (request.residency(), disability_age) {
            (Residency::Norway, false) => OrganizationalUnit::DomesticGeneral,
            (Residency::Norway, true) => OrganizationalUnit::DomesticDisability,
            (Residency::Abroad, false) => OrganizationalUnit::AbroadGeneral,
            (Residency::Abroad, true) => OrganizationalUnit::AbroadDisability,
        };
        RoutingDecision::manual(unit)
    }
}

/// Completeness gate for automatic routing
fn is_complete(request: &RoutingRequest, needs_benefit_type: bool) -> bool {
    request.has_actor_id()
        && request.has_case_record()
        && (!needs_benefit_type || request.benefit_type().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_bounds() {
        let bracket = AgeBracket::UP_TO_60;
        assert!(!bracket.is_disability_age(17));
        assert!(bracket.is_disability_age(18));
        assert!(bracket.is_disability_age(59));
        assert!(!bracket.is_disability_age(60));
    }

    #[test]
    fn test_bilateral_rule_matches_case_insensitively() {
        let rule = BilateralRule {
            countries: vec!["DE".to_string(), "DK".to_string()],
            minor_age: 16,
        };
        assert!(rule.applies_to(Some("de")));
        assert!(rule.applies_to(Some(" DK ")));
        assert!(!rule.applies_to(Some("SE")));
        assert!(!rule.applies_to(None));
    }
}
