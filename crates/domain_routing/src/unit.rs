//! Organizational units a document can be routed to

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target unit of a routing decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizationalUnit {
    /// Machine journaling, no caseworker involved
    AutomaticJournaling,
    /// Generic intake for identification and distribution
    IdAndDistribution,
    FinancePension,
    /// Restricted unit for persons with strict confidentiality
    StrictConfidentiality,
    DomesticGeneral,
    DomesticDisability,
    AbroadGeneral,
    AbroadDisability,
}

impl OrganizationalUnit {
    /// Unit number in the case system
    pub fn number(&self) -> &'static str {
        match self {
            OrganizationalUnit::AutomaticJournaling => "9999",
            OrganizationalUnit::IdAndDistribution => "4303",
            OrganizationalUnit::FinancePension => "4819",
            OrganizationalUnit::StrictConfidentiality => "2103",
            OrganizationalUnit::DomesticGeneral => "4862",
            OrganizationalUnit::DomesticDisability => "4476",
            OrganizationalUnit::AbroadGeneral => "0001",
            OrganizationalUnit::AbroadDisability => "4475",
        }
    }
}

impl fmt::Display for OrganizationalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.number())
    }
}

/// Outcome of routing one document event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub unit: OrganizationalUnit,
    pub automatic: bool,
}

impl RoutingDecision {
    /// Journal automatically without a caseworker
    pub fn automatic() -> Self {
        Self {
            unit: OrganizationalUnit::AutomaticJournaling,
            automatic: true,
        }
    }

    /// Hand the document to a unit for manual treatment
    pub fn manual(unit: OrganizationalUnit) -> Self {
        Self { unit, automatic: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abroad_general_keeps_leading_zeros() {
        assert_eq!(OrganizationalUnit::AbroadGeneral.number(), "0001");
    }

    #[test]
    fn test_decision_constructors() {
        assert!(RoutingDecision::automatic().automatic);
        let manual = RoutingDecision::manual(OrganizationalUnit::FinancePension);
        assert!(!manual.automatic);
        assert_eq!(manual.unit, OrganizationalUnit::FinancePension);
    }
}
