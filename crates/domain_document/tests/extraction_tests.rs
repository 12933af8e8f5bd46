//! Tests for document field extraction and candidate collection

use chrono::NaiveDate;
use serde_json::json;

use core_kernel::{BenefitType, CaseId, DocumentId, DocumentType, NationalId, RelationTag};
use domain_document::{
    CandidateIdentityCollector, CollectError, DocumentError, DocumentFieldExtractor,
    StructuredDocument,
};

const INSURED_PIN: &str = "11067112395";
const SURVIVOR_PIN: &str = "02084890033";
const CHILD_PIN: &str = "15010551282";

fn document(value: serde_json::Value) -> StructuredDocument {
    serde_json::from_value(value).expect("valid document json")
}

fn person(pin: &str) -> serde_json::Value {
    json!({
        "pin": [{"land": "NO", "identifikator": pin}],
        "fornavn": "Test",
        "etternavn": "Person"
    })
}

fn id(pin: &str) -> Option<NationalId> {
    Some(NationalId::parse(pin).unwrap())
}

// ============================================================================
// Single insured person documents
// ============================================================================

mod single_insured_tests {
    use super::*;

    #[test]
    fn test_insured_with_norwegian_pin() {
        let doc = document(json!({"sed": "P2000", "nav": {"bruker": {"person": person(INSURED_PIN)}}}));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, id(INSURED_PIN));
        assert_eq!(candidates[0].relation, RelationTag::Insured);
        assert_eq!(candidates[0].source_document_type, DocumentType::P2000);
        assert!(candidates[0].search_fallback.is_none());
    }

    #[test]
    fn test_last_norwegian_pin_wins() {
        let doc = document(json!({
            "sed": "P8000",
            "nav": {"bruker": {"person": {
                "pin": [
                    {"land": "NO", "identifikator": INSURED_PIN},
                    {"land": "SE", "identifikator": "197106111234"},
                    {"land": "NO", "identifikator": SURVIVOR_PIN}
                ]
            }}}
        }));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert_eq!(candidates[0].id, id(SURVIVOR_PIN));
    }

    #[test]
    fn test_foreign_pin_only_gives_search_fallback() {
        let doc = document(json!({
            "sed": "P5000",
            "nav": {"bruker": {"person": {
                "pin": [{"land": "DE", "identifikator": "65110671A123"}],
                "fornavn": "Hans",
                "etternavn": "Muster",
                "foedselsdato": "1971-06-11"
            }}}
        }));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].id.is_none());
        let fallback = candidates[0].search_fallback.as_ref().unwrap();
        assert_eq!(fallback.name, "Hans Muster");
        assert_eq!(fallback.birthdate, NaiveDate::from_ymd_opt(1971, 6, 11).unwrap());
    }

    #[test]
    fn test_invalid_norwegian_pin_is_treated_as_missing() {
        let doc = document(json!({
            "sed": "P2200",
            "nav": {"bruker": {"person": {
                "pin": [{"land": "NO", "identifikator": "12345678901"}],
                "fornavn": "Ola",
                "foedselsdato": "1971-06-11"
            }}}
        }));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert!(candidates[0].id.is_none());
        assert!(candidates[0].search_fallback.is_some());
    }

    #[test]
    fn test_missing_insured_block_is_parse_error() {
        let doc = document(json!({"sed": "P2000", "nav": {}}));

        let err = DocumentFieldExtractor::new().extract(&doc).unwrap_err();

        assert_eq!(err, DocumentError::missing("P2000", "nav.bruker.person"));
    }
}

// ============================================================================
// Claim-typed documents
// ============================================================================

mod claim_typed_tests {
    use super::*;

    #[test]
    fn test_survivor_claim_with_child_survivor() {
        let mut survivor = person(CHILD_PIN);
        survivor["relasjontilavdod"] = json!({"relasjon": "06"});
        let doc = document(json!({
            "sed": "P15000",
            "nav": {"bruker": {"person": person(INSURED_PIN)}, "krav": {"type": "02"}},
            "pensjon": {"gjenlevende": {"person": survivor}}
        }));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].relation, RelationTag::Insured);
        assert_eq!(candidates[0].benefit_type_hint, Some(BenefitType::Survivor));
        assert_eq!(candidates[1].id, id(CHILD_PIN));
        assert_eq!(candidates[1].relation, RelationTag::Survivor);
        assert_eq!(candidates[1].benefit_type_hint, Some(BenefitType::ChildPension));
    }

    #[test]
    fn test_survivor_without_relation_code_has_no_hint() {
        let doc = document(json!({
            "sed": "P2100",
            "nav": {"bruker": {"person": person(INSURED_PIN)}},
            "pensjon": {"gjenlevende": {"person": person(SURVIVOR_PIN)}}
        }));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert_eq!(candidates[0].benefit_type_hint, Some(BenefitType::Survivor));
        assert_eq!(candidates[1].benefit_type_hint, None);
    }

    #[test]
    fn test_spouse_relation_gives_survivor_hint() {
        let mut survivor = person(SURVIVOR_PIN);
        survivor["relasjontilavdod"] = json!({"relasjon": "01"});
        let doc = document(json!({
            "sed": "P15000",
            "nav": {"bruker": {"person": person(INSURED_PIN)}, "krav": {"type": "02"}},
            "pensjon": {"gjenlevende": {"person": survivor}}
        }));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert_eq!(candidates[1].benefit_type_hint, Some(BenefitType::Survivor));
    }

    #[test]
    fn test_disability_and_default_claim_context() {
        let disability = document(json!({
            "sed": "P15000",
            "nav": {"bruker": {"person": person(INSURED_PIN)}, "krav": {"type": "03"}}
        }));
        let unspecified = document(json!({
            "sed": "P15000",
            "nav": {"bruker": {"person": person(INSURED_PIN)}}
        }));

        let extractor = DocumentFieldExtractor::new();

        assert_eq!(
            extractor.extract(&disability).unwrap()[0].benefit_type_hint,
            Some(BenefitType::Disability)
        );
        assert_eq!(
            extractor.extract(&unspecified).unwrap()[0].benefit_type_hint,
            Some(BenefitType::OldAge)
        );
    }

    #[test]
    fn test_survivor_without_norwegian_pin_is_skipped() {
        let doc = document(json!({
            "sed": "P15000",
            "nav": {"bruker": {"person": person(INSURED_PIN)}, "krav": {"type": "02"}},
            "pensjon": {"gjenlevende": {"person": {"fornavn": "Anna"}}}
        }));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert_eq!(candidates.len(), 1);
    }
}

// ============================================================================
// Recovery documents
// ============================================================================

mod recovery_tests {
    use super::*;

    #[test]
    fn test_one_candidate_per_person_with_status_relation() {
        let doc = document(json!({
            "sed": "R005",
            "nav": {
                "bruker": {
                    "person": person(INSURED_PIN),
                    "tilbakekreving": {"status": {"type": "avdød_mottaker_av_ytelser"}}
                },
                "annenperson": {
                    "person": person(SURVIVOR_PIN),
                    "tilbakekreving": {"status": {"type": "enke_eller_enkemann"}}
                }
            }
        }));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].relation, RelationTag::Deceased);
        assert_eq!(candidates[1].relation, RelationTag::Survivor);
    }

    #[test]
    fn test_debtor_maps_to_other() {
        let doc = document(json!({
            "sed": "R005",
            "nav": {"bruker": {
                "person": person(INSURED_PIN),
                "tilbakekreving": {"status": {"type": "debitor"}}
            }}
        }));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].relation, RelationTag::Other);
    }

    #[test]
    fn test_no_person_blocks_is_parse_error() {
        let doc = document(json!({"sed": "R005", "nav": {}}));

        assert!(matches!(
            DocumentFieldExtractor::new().extract(&doc),
            Err(DocumentError::DocumentParse { .. })
        ));
    }
}

// ============================================================================
// Generic fallback
// ============================================================================

mod generic_tests {
    use super::*;

    #[test]
    fn test_claimant_other_person_preferred() {
        let mut claimant = person(SURVIVOR_PIN);
        claimant["rolle"] = json!("01");
        let doc = document(json!({
            "sed": "H070",
            "nav": {"bruker": {"person": person(INSURED_PIN)}, "annenperson": {"person": claimant}}
        }));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, id(SURVIVOR_PIN));
        assert_eq!(candidates[0].relation, RelationTag::Survivor);
    }

    #[test]
    fn test_non_claimant_other_person_falls_back_to_insured() {
        let mut other = person(SURVIVOR_PIN);
        other["rolle"] = json!("02");
        let doc = document(json!({
            "sed": "X005",
            "nav": {"bruker": {"person": person(INSURED_PIN)}, "annenperson": {"person": other}}
        }));

        let candidates = DocumentFieldExtractor::new().extract(&doc).unwrap();

        assert_eq!(candidates[0].id, id(INSURED_PIN));
        assert_eq!(candidates[0].relation, RelationTag::Insured);
    }

    #[test]
    fn test_no_person_is_empty_not_error() {
        let doc = document(json!({"sed": "R004"}));

        assert!(DocumentFieldExtractor::new().extract(&doc).unwrap().is_empty());
    }
}

// ============================================================================
// Collector
// ============================================================================

mod collector_tests {
    use super::*;

    #[test]
    fn test_preserves_document_order_without_dedup() {
        let documents = vec![
            (
                DocumentId::new("doc-1"),
                document(json!({"sed": "P2000", "nav": {"bruker": {"person": person(INSURED_PIN)}}})),
            ),
            (
                DocumentId::new("doc-2"),
                document(json!({"sed": "P5000", "nav": {"bruker": {"person": person(SURVIVOR_PIN)}}})),
            ),
            (
                DocumentId::new("doc-3"),
                document(json!({"sed": "P6000", "nav": {"bruker": {"person": person(INSURED_PIN)}}})),
            ),
        ];

        let candidates = CandidateIdentityCollector::default()
            .collect(&CaseId::new("147729"), &documents)
            .unwrap();

        let ids: Vec<_> = candidates.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec![id(INSURED_PIN), id(SURVIVOR_PIN), id(INSURED_PIN)]);
        assert_eq!(candidates[1].source_document_type, DocumentType::P5000);
    }

    #[test]
    fn test_parse_error_names_document() {
        let documents = vec![
            (
                DocumentId::new("doc-1"),
                document(json!({"sed": "P2000", "nav": {"bruker": {"person": person(INSURED_PIN)}}})),
            ),
            (DocumentId::new("doc-2"), document(json!({"sed": "P2200"}))),
        ];

        let err: CollectError = CandidateIdentityCollector::default()
            .collect(&CaseId::new("147729"), &documents)
            .unwrap_err();

        assert_eq!(err.document_id, DocumentId::new("doc-2"));
        assert!(matches!(err.source, DocumentError::DocumentParse { .. }));
    }
}
