//! Document field extraction
//!
//! Each document type places identifying information at a different spot,
//! so extraction is a static table from document type to `ExtractionRule`.
//!
//! | Rule            | Document types                                         |
//! |-----------------|--------------------------------------------------------|
//! | `SingleInsured` | P2000, P2200, P4000, P5000, P6000, P7000, P8000, P10000, P12000 |
//! | `ClaimTyped`    | P15000, P2100                                          |
//! | `Recovery`      | R005                                                   |
//! | `Generic`       | everything else                                        |

use tracing::debug;

use core_kernel::{BenefitType, DocumentType, NationalId, RelationTag};

use crate::candidate::{CandidateIdentity, SearchFallback};
use crate::document::{Person, PersonBlock, StructuredDocument};
use crate::error::DocumentError;

/// Claim code for a survivor benefit claim
pub const SURVIVOR_CLAIM_CODE: &str = "02";
/// Claim code for a disability benefit claim
pub const DISABILITY_CLAIM_CODE: &str = "03";
/// Role code of a secondary person who is the claimant
pub const CLAIMANT_ROLE_CODE: &str = "01";
/// Relationship-to-deceased codes for children (own, adopted, foster, step)
pub const CHILD_RELATION_CODES: [&str; 4] = ["06", "07", "08", "09"];

/// How identities are pulled out of one document type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionRule {
    /// One insured person block
    SingleInsured,
    /// Insured person plus claim code, with an optional survivor block
    ClaimTyped,
    /// Insured and other person, each with a repayment status
    Recovery,
    /// Claimant secondary person, else the insured person
    Generic,
}

impl ExtractionRule {
    pub fn for_document_type(document_type: &DocumentType) -> Self {
        match document_type {
            DocumentType::P2000
            | DocumentType::P2200
            | DocumentType::P4000
            | DocumentType::P5000
            | DocumentType::P6000
            | DocumentType::P7000
            | DocumentType::P8000
            | DocumentType::P10000
            | DocumentType::P12000 => ExtractionRule::SingleInsured,
            DocumentType::P15000 | DocumentType::P2100 => ExtractionRule::ClaimTyped,
            DocumentType::R005 => ExtractionRule::Recovery,
            DocumentType::R004 | DocumentType::H070 | DocumentType::Other(_) => ExtractionRule::Generic,
        }
    }
}

/// Maps a repayment status code to a relation
pub fn relation_for_recovery_status(code: Option<&str>) -> RelationTag {
    match code {
        Some("avdød_mottaker_av_ytelser") => RelationTag::Deceased,
        Some("enke_eller_enkemann") => RelationTag::Survivor,
        Some("mottaker_av_ytelser") => RelationTag::Insured,
        // "debitor", unknown codes and a missing status
        _ => RelationTag::Other,
    }
}

/// Benefit type for a survivor given their relationship to the deceased
pub fn benefit_for_relation_to_deceased(code: Option<&str>) -> Option<BenefitType> {
    match code.map(str::trim) {
        None | Some("") => None,
        Some(code) if CHILD_RELATION_CODES.contains(&code) => Some(BenefitType::ChildPension),
        Some(_) => Some(BenefitType::Survivor),
    }
}

/// Benefit context implied by a claim code
pub fn benefit_for_claim_code(code: Option<&str>) -> BenefitType {
    match code {
        Some(SURVIVOR_CLAIM_CODE) => BenefitType::Survivor,
        Some(DISABILITY_CLAIM_CODE) => BenefitType::Disability,
        _ => BenefitType::OldAge,
    }
}

/// Pulls candidate identities out of one structured document
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentFieldExtractor;

impl DocumentFieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts candidates in the order the document presents them
    ///
    /// # Errors
    ///
    /// `DocumentParse` when the document type requires a person block that
    /// is absent and no fallback rule applies.
    pub fn extract(&self, document: &StructuredDocument) -> Result<Vec<CandidateIdentity>, DocumentError> {
        let rule = ExtractionRule::for_document_type(&document.document_type);
        debug!(document_type = %document.document_type, ?rule, "extracting candidate identities");

        match rule {
            ExtractionRule::SingleInsured => Self::extract_single_insured(document),
            ExtractionRule::ClaimTyped => Self::extract_claim_typed(document),
            ExtractionRule::Recovery => Self::extract_recovery(document),
            ExtractionRule::Generic => Ok(Self::extract_generic(document)),
        }
    }

    fn extract_single_insured(document: &StructuredDocument) -> Result<Vec<CandidateIdentity>, DocumentError> {
        let insured = document
            .insured_person()
            .ok_or_else(|| DocumentError::missing(document.document_type.code(), "nav.bruker.person"))?;

        Ok(vec![candidate_from(insured, RelationTag::Insured, None, &document.document_type)])
    }

    fn extract_claim_typed(document: &StructuredDocument) -> Result<Vec<CandidateIdentity>, DocumentError> {
        let insured = document
            .insured_person()
            .ok_or_else(|| DocumentError::missing(document.document_type.code(), "nav.bruker.person"))?;

        let claim_code = match document.document_type {
            DocumentType::P2100 => Some(SURVIVOR_CLAIM_CODE),
            _ => document.claim_code(),
        };
        let context = benefit_for_claim_code(claim_code);

        let mut candidates = vec![candidate_from(
            insured,
            RelationTag::Insured,
            Some(context),
            &document.document_type,
        )];

        if let Some(survivor) = document.survivor_person() {
            if survivor.norwegian_pin().is_some() {
                let hint = benefit_for_relation_to_deceased(survivor.relation_to_deceased_code());
                candidates.push(candidate_from(
                    survivor,
                    RelationTag::Survivor,
                    hint,
                    &document.document_type,
                ));
            }
        }

        Ok(candidates)
    }

    fn extract_recovery(document: &StructuredDocument) -> Result<Vec<CandidateIdentity>, DocumentError> {
        let blocks: Vec<&PersonBlock> = [document.insured(), document.other()]
            .into_iter()
            .flatten()
            .filter(|block| block.person.is_some())
            .collect();

        if blocks.is_empty() {
            return Err(DocumentError::missing(document.document_type.code(), "nav.bruker.person"));
        }

        Ok(blocks
            .into_iter()
            .filter_map(|block| {
                let relation = relation_for_recovery_status(block.recovery_status_code());
                block
                    .person
                    .as_ref()
                    .map(|person| candidate_from(person, relation, None, &document.document_type))
            })
            .collect())
    }

    fn extract_generic(document: &StructuredDocument) -> Vec<CandidateIdentity> {
        let claimant = document
            .other_person()
            .filter(|person| person.role.as_deref().map(str::trim) == Some(CLAIMANT_ROLE_CODE));

        if let Some(claimant) = claimant {
            return vec![candidate_from(claimant, RelationTag::Survivor, None, &document.document_type)];
        }

        document
            .insured_person()
            .map(|insured| candidate_from(insured, RelationTag::Insured, None, &document.document_type))
            .into_iter()
            .collect()
    }
}

/// Builds a candidate from one person, falling back to name and birthdate
/// when the person has no usable Norwegian pin
fn candidate_from(
    person: &Person,
    relation: RelationTag,
    benefit_type_hint: Option<BenefitType>,
    document_type: &DocumentType,
) -> CandidateIdentity {
    let id = person.norwegian_pin().and_then(|pin| match NationalId::parse(pin) {
        Ok(id) => Some(id),
        Err(error) => {
            debug!(%document_type, %error, "ignoring invalid Norwegian pin");
            None
        }
    });
    let birthdate = person.parsed_birthdate();

    let search_fallback = match (&id, person.full_name(), birthdate) {
        (None, Some(name), Some(birthdate)) => Some(SearchFallback { name, birthdate }),
        _ => None,
    };

    CandidateIdentity {
        id,
        relation,
        benefit_type_hint,
        source_document_type: document_type.clone(),
        birthdate,
        search_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table() {
        assert_eq!(ExtractionRule::for_document_type(&DocumentType::P2000), ExtractionRule::SingleInsured);
        assert_eq!(ExtractionRule::for_document_type(&DocumentType::P15000), ExtractionRule::ClaimTyped);
        assert_eq!(ExtractionRule::for_document_type(&DocumentType::R005), ExtractionRule::Recovery);
        assert_eq!(
            ExtractionRule::for_document_type(&DocumentType::Other("X005".to_string())),
            ExtractionRule::Generic
        );
    }

    #[test]
    fn test_recovery_status_table() {
        assert_eq!(relation_for_recovery_status(Some("avdød_mottaker_av_ytelser")), RelationTag::Deceased);
        assert_eq!(relation_for_recovery_status(Some("enke_eller_enkemann")), RelationTag::Survivor);
        assert_eq!(relation_for_recovery_status(Some("debitor")), RelationTag::Other);
        assert_eq!(relation_for_recovery_status(None), RelationTag::Other);
    }

    #[test]
    fn test_relation_to_deceased_hint() {
        assert_eq!(benefit_for_relation_to_deceased(Some("06")), Some(BenefitType::ChildPension));
        assert_eq!(benefit_for_relation_to_deceased(Some("01")), Some(BenefitType::Survivor));
        assert_eq!(benefit_for_relation_to_deceased(None), None);
    }

    #[test]
    fn test_claim_code_context() {
        assert_eq!(benefit_for_claim_code(Some("02")), BenefitType::Survivor);
        assert_eq!(benefit_for_claim_code(Some("03")), BenefitType::Disability);
        assert_eq!(benefit_for_claim_code(None), BenefitType::OldAge);
    }
}
