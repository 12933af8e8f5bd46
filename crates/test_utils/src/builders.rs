//! Test Data Builders
//!
//! Provides builder patterns for constructing documents and registry
//! records with sensible defaults. Tests set only the fields they care
//! about.

use chrono::NaiveDate;
use core_kernel::{DocumentType, NationalId};
use domain_document::{
    ClaimBlock, NavBlock, PensionBlock, Person, PersonBlock, Pin, RecoveryBlock, RecoveryStatus,
    RelationToDeceased, StructuredDocument,
};
use domain_identity::PersonRecord;

/// Builder for a person inside a document
#[derive(Debug, Clone, Default)]
pub struct TestPersonBuilder {
    person: Person,
}

impl TestPersonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a Norwegian pin
    pub fn with_norwegian_pin(self, pin: impl Into<String>) -> Self {
        self.with_pin("NO", pin)
    }

    /// Adds a pin for any country
    pub fn with_pin(mut self, country: impl Into<String>, pin: impl Into<String>) -> Self {
        self.person.pin.push(Pin {
            country: Some(country.into()),
            identifier: Some(pin.into()),
        });
        self
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.person.first_name = Some(first.into());
        self.person.last_name = Some(last.into());
        self
    }

    /// Sets the birthdate in document format
    pub fn with_birthdate(mut self, birthdate: NaiveDate) -> Self {
        self.person.birthdate = Some(birthdate.format("%Y-%m-%d").to_string());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.person.role = Some(role.into());
        self
    }

    pub fn with_relation_to_deceased(mut self, code: impl Into<String>) -> Self {
        self.person.relation_to_deceased = Some(RelationToDeceased {
            code: Some(code.into()),
        });
        self
    }

    pub fn build(self) -> Person {
        self.person
    }
}

/// Builder for structured documents
#[derive(Debug, Clone)]
pub struct TestDocumentBuilder {
    document: StructuredDocument,
}

impl TestDocumentBuilder {
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document: StructuredDocument::new(document_type),
        }
    }

    fn nav(&mut self) -> &mut NavBlock {
        self.document.nav.get_or_insert_with(NavBlock::default)
    }

    /// Sets the insured person
    pub fn with_insured(mut self, person: Person) -> Self {
        self.nav().insured = Some(PersonBlock {
            person: Some(person),
            recovery: None,
        });
        self
    }

    /// Sets the insured person with a repayment status code
    pub fn with_insured_recovery(mut self, person: Person, status: impl Into<String>) -> Self {
        self.nav().insured = Some(recovery_block(person, status.into()));
        self
    }

    /// Sets the secondary person
    pub fn with_other_person(mut self, person: Person) -> Self {
        self.nav().other_person = Some(PersonBlock {
            person: Some(person),
            recovery: None,
        });
        self
    }

    /// Sets the secondary person with a repayment status code
    pub fn with_other_recovery(mut self, person: Person, status: impl Into<String>) -> Self {
        self.nav().other_person = Some(recovery_block(person, status.into()));
        self
    }

    pub fn with_claim_type(mut self, code: impl Into<String>) -> Self {
        self.nav().claim = Some(ClaimBlock {
            claim_type: Some(code.into()),
        });
        self
    }

    /// Sets the survivor in the pension block
    pub fn with_survivor(mut self, person: Person) -> Self {
        self.document.pension = Some(PensionBlock {
            survivor: Some(PersonBlock {
                person: Some(person),
                recovery: None,
            }),
        });
        self
    }

    pub fn build(self) -> StructuredDocument {
        self.document
    }
}

fn recovery_block(person: Person, status: String) -> PersonBlock {
    PersonBlock {
        person: Some(person),
        recovery: Some(RecoveryBlock {
            status: Some(RecoveryStatus { code: Some(status) }),
        }),
    }
}

/// Builder for person registry records
#[derive(Debug, Clone)]
pub struct TestPersonRecordBuilder {
    record: PersonRecord,
}

impl TestPersonRecordBuilder {
    /// Creates a record for an actor living in Norway
    pub fn new(actor_id: impl Into<String>) -> Self {
        let mut record = PersonRecord::new(actor_id.into());
        record.residential_country = Some("NOR".to_string());
        record.geographic_unit = Some("0301".to_string());
        Self { record }
    }

    /// Sets the national id and the birthdate it encodes
    ///
    /// # Panics
    ///
    /// Panics if `pin` is not a valid national id
    pub fn with_national_id(mut self, pin: &str) -> Self {
        let id = NationalId::parse(pin).expect("fixture pin must be valid");
        self.record.birthdate = Some(id.birthdate());
        self.record.national_id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.record.name = Some(name.into());
        self
    }

    /// Overrides the registry birthdate
    pub fn with_birthdate(mut self, birthdate: NaiveDate) -> Self {
        self.record.birthdate = Some(birthdate);
        self
    }

    pub fn residing_in(mut self, country: impl Into<String>) -> Self {
        self.record.residential_country = Some(country.into());
        self
    }

    pub fn with_contact_country(mut self, country: impl Into<String>) -> Self {
        self.record.contact_country = Some(country.into());
        self
    }

    pub fn build(self) -> PersonRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_builder_fills_nav_once() {
        let doc = TestDocumentBuilder::new(DocumentType::P15000)
            .with_insured(TestPersonBuilder::new().with_norwegian_pin("11067112395").build())
            .with_claim_type("02")
            .build();

        assert_eq!(doc.claim_code(), Some("02"));
        assert_eq!(doc.insured_person().and_then(Person::norwegian_pin), Some("11067112395"));
    }

    #[test]
    fn test_record_builder_takes_birthdate_from_id() {
        let record = TestPersonRecordBuilder::new("1").with_national_id("11067112395").build();
        assert_eq!(record.birthdate, NaiveDate::from_ymd_opt(1971, 6, 11));
        assert_eq!(record.country_code(), "NOR");
    }
}
