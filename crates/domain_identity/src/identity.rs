//! The set of persons resolved for one case event

use serde::{Deserialize, Serialize};

use core_kernel::{CaseType, RelationTag};

use crate::person::ResolvedPerson;

/// How many persons a case type may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionRule {
    /// At most one insured person; more is a business error
    SingleInsured,
    /// Any number of persons; the first in collector order is primary
    MultiplePersons,
}

impl SelectionRule {
    pub fn for_case_type(case_type: CaseType) -> Self {
        match case_type {
            CaseType::RBuc02 => SelectionRule::MultiplePersons,
            _ => SelectionRule::SingleInsured,
        }
    }
}

/// Persons resolved for a case, in collector order
///
/// An empty identity means "unknown person": routing still runs but can
/// never be automatic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIdentity {
    persons: Vec<ResolvedPerson>,
    selection: SelectionRule,
    subject_index: Option<usize>,
}

impl ResolvedIdentity {
    /// Builds an identity, picking the subject and attaching related persons
    pub fn new(mut persons: Vec<ResolvedPerson>, selection: SelectionRule) -> Self {
        let subject_index = subject_index(&persons);

        if let Some(index) = subject_index {
            let related: Vec<ResolvedPerson> = persons
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, person)| ResolvedPerson {
                    related_persons: Vec::new(),
                    ..person.clone()
                })
                .collect();
            persons[index].related_persons = related;
        }

        Self {
            persons,
            selection,
            subject_index,
        }
    }

    /// An identity with no resolved persons
    pub fn unknown(selection: SelectionRule) -> Self {
        Self {
            persons: Vec::new(),
            selection,
            subject_index: None,
        }
    }

    pub fn persons(&self) -> &[ResolvedPerson] {
        &self.persons
    }

    pub fn selection(&self) -> SelectionRule {
        self.selection
    }

    pub fn is_unknown(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn has_multiple_persons(&self) -> bool {
        self.persons.len() > 1
    }

    /// First resolved person in collector order
    pub fn primary(&self) -> Option<&ResolvedPerson> {
        self.persons.first()
    }

    /// Subject of the journal entry: survivor over insured over others
    pub fn subject(&self) -> Option<&ResolvedPerson> {
        self.subject_index.and_then(|index| self.persons.get(index))
    }

    /// Person whose data drives routing
    pub fn routing_person(&self) -> Option<&ResolvedPerson> {
        match self.selection {
            SelectionRule::MultiplePersons => self.primary(),
            SelectionRule::SingleInsured => self.subject(),
        }
    }

    /// True when any resolved person has strict confidentiality
    pub fn is_confidential(&self) -> bool {
        self.persons.iter().any(|person| person.confidential)
    }

    pub fn count_relation(&self, relation: RelationTag) -> usize {
        self.persons.iter().filter(|p| p.relation == relation).count()
    }
}

/// Highest priority relation; ties go to the earliest person
fn subject_index(persons: &[ResolvedPerson]) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for (index, person) in persons.iter().enumerate() {
        let priority = person.relation.subject_priority();
        if best.map_or(true, |(_, current)| priority > current) {
            best = Some((index, priority));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ActorId;

    fn person(actor: &str, relation: RelationTag) -> ResolvedPerson {
        ResolvedPerson {
            actor_id: ActorId::new(actor),
            national_id: None,
            relation,
            benefit_type: None,
            birthdate: None,
            country_code: "NOR".to_string(),
            geographic_unit: None,
            confidential: false,
            related_persons: Vec::new(),
        }
    }

    #[test]
    fn test_survivor_outranks_insured() {
        let identity = ResolvedIdentity::new(
            vec![
                person("1", RelationTag::Insured),
                person("2", RelationTag::Survivor),
                person("3", RelationTag::Other),
            ],
            SelectionRule::SingleInsured,
        );

        let subject = identity.subject().unwrap();
        assert_eq!(subject.actor_id.as_str(), "2");
        assert_eq!(subject.related_persons.len(), 2);
        assert_eq!(identity.routing_person().unwrap().actor_id.as_str(), "2");
        assert_eq!(identity.primary().unwrap().actor_id.as_str(), "1");
    }

    #[test]
    fn test_tie_goes_to_first() {
        let identity = ResolvedIdentity::new(
            vec![person("1", RelationTag::Deceased), person("2", RelationTag::Other)],
            SelectionRule::MultiplePersons,
        );

        assert_eq!(identity.subject().unwrap().actor_id.as_str(), "1");
    }

    #[test]
    fn test_multiple_persons_routes_on_primary() {
        let identity = ResolvedIdentity::new(
            vec![person("1", RelationTag::Deceased), person("2", RelationTag::Survivor)],
            SelectionRule::MultiplePersons,
        );

        assert!(identity.has_multiple_persons());
        assert_eq!(identity.routing_person().unwrap().actor_id.as_str(), "1");
        assert_eq!(identity.subject().unwrap().actor_id.as_str(), "2");
    }

    #[test]
    fn test_unknown_identity() {
        let identity = ResolvedIdentity::unknown(SelectionRule::SingleInsured);
        assert!(identity.is_unknown());
        assert!(identity.routing_person().is_none());
        assert!(!identity.is_confidential());
    }

    #[test]
    fn test_selection_rule_per_case_type() {
        assert_eq!(SelectionRule::for_case_type(CaseType::RBuc02), SelectionRule::MultiplePersons);
        assert_eq!(SelectionRule::for_case_type(CaseType::PBuc01), SelectionRule::SingleInsured);
    }
}
