//! Pre-built Test Fixtures
//!
//! Provides ready-to-use national ids, documents and registry records.
//! All pins carry valid check digits.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use core_kernel::{DocumentType, NationalId};
use domain_document::StructuredDocument;
use domain_identity::{InMemoryPersonRegistry, PersonRecord};

use crate::builders::{TestDocumentBuilder, TestPersonBuilder, TestPersonRecordBuilder};

/// Reference date used for age computations in tests
pub static DECISION_DATE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"));

/// Fixture for national ids
pub struct PinFixtures;

impl PinFixtures {
    /// Born 1971-06-11
    pub const INSURED: &'static str = "11067112395";
    /// Born 1948-08-02
    pub const SURVIVOR: &'static str = "02084890033";
    /// Born 2005-01-15
    pub const CHILD: &'static str = "15010551282";
    /// D-number, born 1985-03-24
    pub const D_NUMBER: &'static str = "64038541089";
    /// Born 1950-12-01
    pub const DECEASED: &'static str = "01125004292";

    pub fn parse(pin: &str) -> NationalId {
        NationalId::parse(pin).expect("fixture pin must be valid")
    }
}

/// Fixture for registry actor ids
pub struct ActorFixtures;

impl ActorFixtures {
    pub const INSURED: &'static str = "1000101917358";
    pub const SURVIVOR: &'static str = "1000101917111";
    pub const CHILD: &'static str = "1000101917222";
    pub const D_NUMBER: &'static str = "1000101917333";
    pub const DECEASED: &'static str = "1000101917444";
}

/// Fixture for structured documents
pub struct DocumentFixtures;

impl DocumentFixtures {
    /// Old-age claim for one insured person
    pub fn p2000(pin: &str) -> StructuredDocument {
        TestDocumentBuilder::new(DocumentType::P2000)
            .with_insured(TestPersonBuilder::new().with_norwegian_pin(pin).with_name("Ola", "Nordmann").build())
            .build()
    }

    /// Survivor claim for a deceased insured person and a survivor
    pub fn p2100(insured_pin: &str, survivor_pin: &str, relation_code: &str) -> StructuredDocument {
        TestDocumentBuilder::new(DocumentType::P2100)
            .with_insured(TestPersonBuilder::new().with_norwegian_pin(insured_pin).build())
            .with_survivor(
                TestPersonBuilder::new()
                    .with_norwegian_pin(survivor_pin)
                    .with_relation_to_deceased(relation_code)
                    .build(),
            )
            .build()
    }

    /// Claim document with a claim type code
    pub fn p15000(pin: &str, claim_code: &str) -> StructuredDocument {
        TestDocumentBuilder::new(DocumentType::P15000)
            .with_insured(TestPersonBuilder::new().with_norwegian_pin(pin).build())
            .with_claim_type(claim_code)
            .build()
    }

    /// Recovery document with two persons and their repayment status
    pub fn recovery(
        document_type: DocumentType,
        insured: (&str, &str),
        other: (&str, &str),
    ) -> StructuredDocument {
        TestDocumentBuilder::new(document_type)
            .with_insured_recovery(TestPersonBuilder::new().with_norwegian_pin(insured.0).build(), insured.1)
            .with_other_recovery(TestPersonBuilder::new().with_norwegian_pin(other.0).build(), other.1)
            .build()
    }

    /// Document whose insured person only has a foreign pin
    pub fn without_norwegian_pin(document_type: DocumentType, name: (&str, &str), birthdate: NaiveDate) -> StructuredDocument {
        TestDocumentBuilder::new(document_type)
            .with_insured(
                TestPersonBuilder::new()
                    .with_pin("SE", "197106111234")
                    .with_name(name.0, name.1)
                    .with_birthdate(birthdate)
                    .build(),
            )
            .build()
    }
}

/// Fixture for registry records
pub struct PersonFixtures;

impl PersonFixtures {
    pub fn resident(actor_id: &str, pin: &str) -> PersonRecord {
        TestPersonRecordBuilder::new(actor_id).with_national_id(pin).build()
    }

    pub fn abroad(actor_id: &str, pin: &str, country: &str) -> PersonRecord {
        TestPersonRecordBuilder::new(actor_id)
            .with_national_id(pin)
            .residing_in(country)
            .build()
    }

    /// Registry holding every fixture pin, all resident in Norway except
    /// the survivor, who lives in Sweden
    pub fn registry() -> InMemoryPersonRegistry {
        InMemoryPersonRegistry::new()
            .with_person(Self::resident(ActorFixtures::INSURED, PinFixtures::INSURED))
            .with_person(Self::abroad(ActorFixtures::SURVIVOR, PinFixtures::SURVIVOR, "SWE"))
            .with_person(Self::resident(ActorFixtures::CHILD, PinFixtures::CHILD))
            .with_person(Self::resident(ActorFixtures::D_NUMBER, PinFixtures::D_NUMBER))
            .with_person(Self::resident(ActorFixtures::DECEASED, PinFixtures::DECEASED))
    }
}
