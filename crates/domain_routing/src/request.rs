//! Routing requests
//!
//! A request is everything a handler may look at. It is assembled once per
//! event and never changed afterwards, so deciding twice on the same request
//! gives the same answer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{age_on, BenefitType, CaseType, DocumentType, EventType};
use domain_identity::{ResolvedIdentity, ResolvedPerson, Residency};

use crate::case::CaseRecord;

/// Input to a routing decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRequest {
    case_type: CaseType,
    event_type: EventType,
    document_type: DocumentType,
    person: Option<ResolvedPerson>,
    multiple_persons: bool,
    case_record: Option<CaseRecord>,
    confidential: bool,
    sender_country: Option<String>,
    benefit_type: Option<BenefitType>,
    decision_date: NaiveDate,
}

impl RoutingRequest {
    /// Starts a request for one document event
    ///
    /// `decision_date` is the date ages are computed against.
    pub fn builder(
        case_type: CaseType,
        event_type: EventType,
        document_type: DocumentType,
        decision_date: NaiveDate,
    ) -> RoutingRequestBuilder {
        RoutingRequestBuilder {
            case_type,
            event_type,
            document_type,
            decision_date,
            person: None,
            multiple_persons: false,
            case_record: None,
            confidential: false,
            sender_country: None,
            benefit_type: None,
        }
    }

    pub fn case_type(&self) -> CaseType {
        self.case_type
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn document_type(&self) -> &DocumentType {
        &self.document_type
    }

    /// The person routing is decided on, if any was resolved
    pub fn person(&self) -> Option<&ResolvedPerson> {
        self.person.as_ref()
    }

    pub fn has_multiple_persons(&self) -> bool {
        self.multiple_persons
    }

    pub fn case_record(&self) -> Option<&CaseRecord> {
        self.case_record.as_ref()
    }

    pub fn is_confidential(&self) -> bool {
        self.confidential
    }

    pub fn sender_country(&self) -> Option<&str> {
        self.sender_country.as_deref()
    }

    pub fn benefit_type(&self) -> Option<BenefitType> {
        self.benefit_type
    }

    pub fn decision_date(&self) -> NaiveDate {
        self.decision_date
    }

    pub fn is_sent(&self) -> bool {
        self.event_type == EventType::Sent
    }

    /// Age of the routing person on the decision date
    pub fn age(&self) -> Option<u32> {
        self.person
            .as_ref()
            .and_then(|person| person.birthdate)
            .map(|birthdate| age_on(birthdate, self.decision_date))
    }

    /// Residency of the routing person; unknown counts as abroad
    pub fn residency(&self) -> Residency {
        self.person
            .as_ref()
            .map_or(Residency::Abroad, ResolvedPerson::residency)
    }

    pub fn has_actor_id(&self) -> bool {
        self.person.as_ref().is_some_and(ResolvedPerson::has_actor_id)
    }

    /// True when an existing case record with a usable id is attached
    pub fn has_case_record(&self) -> bool {
        self.case_record.as_ref().is_some_and(CaseRecord::has_case_id)
    }

    /// True when the attached case record is closed with the given benefit
    pub fn has_closed_case(&self, benefit_type: BenefitType) -> bool {
        self.case_record
            .as_ref()
            .is_some_and(|record| record.is_closed() && record.benefit_type == benefit_type)
    }
}

/// Builder for [`RoutingRequest`]
#[derive(Debug, Clone)]
pub struct RoutingRequestBuilder {
    case_type: CaseType,
    event_type: EventType,
    document_type: DocumentType,
    decision_date: NaiveDate,
    person: Option<ResolvedPerson>,
    multiple_persons: bool,
    case_record: Option<CaseRecord>,
    confidential: bool,
    sender_country: Option<String>,
    benefit_type: Option<BenefitType>,
}

impl RoutingRequestBuilder {
    /// Takes the routing person, multiplicity and confidentiality from a
    /// resolved identity
    pub fn identity(mut self, identity: &ResolvedIdentity) -> Self {
        self.person = identity.routing_person().cloned();
        self.multiple_persons = identity.has_multiple_persons();
        self.confidential |= identity.is_confidential();
        self
    }

    pub fn person(mut self, person: ResolvedPerson) -> Self {
        self.confidential |= person.confidential;
        self.person = Some(person);
        self
    }

    pub fn multiple_persons(mut self, multiple: bool) -> Self {
        self.multiple_persons = multiple;
        self
    }

    pub fn case_record(mut self, case_record: Option<CaseRecord>) -> Self {
        self.case_record = case_record;
        self
    }

    pub fn confidential(mut self, confidential: bool) -> Self {
        self.confidential |= confidential;
        self
    }

    pub fn sender_country(mut self, country: impl Into<String>) -> Self {
        self.sender_country = Some(country.into());
        self
    }

    /// Sets the benefit type explicitly
    ///
    /// Without it the case record's benefit type is used, then the routing
    /// person's hint.
    pub fn benefit_type(mut self, benefit_type: BenefitType) -> Self {
        self.benefit_type = Some(benefit_type);
        self
    }

    pub fn build(self) -> RoutingRequest {
        let benefit_type = self
            .benefit_type
            .or_else(|| self.case_record.as_ref().map(|record| record.benefit_type))
            .or_else(|| self.person.as_ref().and_then(|person| person.benefit_type));

        RoutingRequest {
            case_type: self.case_type,
            event_type: self.event_type,
            document_type: self.document_type,
            person: self.person,
            multiple_persons: self.multiple_persons,
            case_record: self.case_record,
            confidential: self.confidential,
            sender_country: self.sender_country,
            benefit_type,
            decision_date: self.decision_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ActorId, CaseStatus, RelationTag};
    use domain_identity::SelectionRule;

    fn person(benefit_type: Option<BenefitType>) -> ResolvedPerson {
        ResolvedPerson {
            actor_id: ActorId::new("111"),
            national_id: None,
            relation: RelationTag::Insured,
            benefit_type,
            birthdate: NaiveDate::from_ymd_opt(1980, 5, 20),
            country_code: "NOR".to_string(),
            geographic_unit: None,
            confidential: false,
            related_persons: Vec::new(),
        }
    }

    fn builder() -> RoutingRequestBuilder {
        RoutingRequest::builder(
            CaseType::PBuc01,
            EventType::Sent,
            DocumentType::P2000,
            NaiveDate::from_ymd_opt(2024, 5, 19).unwrap(),
        )
    }

    #[test]
    fn test_age_is_computed_on_decision_date() {
        let request = builder().person(person(None)).build();
        assert_eq!(request.age(), Some(43));
    }

    #[test]
    fn test_benefit_type_precedence() {
        let record = CaseRecord::new("555", BenefitType::Disability, CaseStatus::Ongoing);

        let from_record = builder()
            .person(person(Some(BenefitType::Survivor)))
            .case_record(Some(record.clone()))
            .build();
        assert_eq!(from_record.benefit_type(), Some(BenefitType::Disability));

        let from_hint = builder().person(person(Some(BenefitType::Survivor))).build();
        assert_eq!(from_hint.benefit_type(), Some(BenefitType::Survivor));

        let explicit = builder()
            .case_record(Some(record))
            .benefit_type(BenefitType::OldAge)
            .build();
        assert_eq!(explicit.benefit_type(), Some(BenefitType::OldAge));
    }

    #[test]
    fn test_confidential_is_sticky() {
        let mut protected = person(None);
        protected.confidential = true;
        let request = builder().person(protected).confidential(false).build();
        assert!(request.is_confidential());
    }

    #[test]
    fn test_unknown_identity_routes_abroad_without_age() {
        let request = builder()
            .identity(&ResolvedIdentity::unknown(SelectionRule::SingleInsured))
            .build();

        assert!(request.person().is_none());
        assert_eq!(request.residency(), Residency::Abroad);
        assert_eq!(request.age(), None);
        assert!(!request.has_actor_id());
    }
}
