//! Identity resolution
//!
//! Turns document candidates into registry-confirmed persons:
//!
//! 1. Deduplicate candidates by national id, keeping first-seen order
//! 2. Look each one up (by id, or by name and birthdate), merging hits on a
//!    person already resolved
//! 3. Drop candidates whose encoded birthdate disagrees with the registry
//!    or the document
//! 4. Attach country and confidentiality
//! 5. Apply the case type's selection rule

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use core_kernel::{
    CaseId, CaseType, DocumentId, DocumentType, EventType, MetricsPort, NationalId,
    OperationMetadata, PortError, RelationTag,
};
use domain_document::CandidateIdentity;

use crate::error::IdentityError;
use crate::identity::{ResolvedIdentity, SelectionRule};
use crate::person::{PersonRecord, ResolvedPerson};
use crate::ports::{ConfidentialityCheck, PersonRegistry, PersonRegistryExt};

/// The event a resolution runs for
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    pub case_id: CaseId,
    pub case_type: CaseType,
    pub event_type: EventType,
    pub document_id: DocumentId,
    pub metadata: OperationMetadata,
}

impl ResolutionContext {
    pub fn new(case_id: CaseId, case_type: CaseType, event_type: EventType, document_id: DocumentId) -> Self {
        Self {
            case_id,
            case_type,
            event_type,
            document_id,
            metadata: OperationMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: OperationMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Source label for a candidate built from the caller's known id
const KNOWN_ID_SOURCE: &str = "EVENT";

enum Outcome {
    Resolved(ResolvedPerson),
    NotFound,
    Mismatch,
    Unresolvable,
}

/// Resolves candidate identities against the person registry
pub struct IdentityResolver {
    registry: Arc<dyn PersonRegistry>,
    confidentiality: Arc<dyn ConfidentialityCheck>,
    metrics: Arc<dyn MetricsPort>,
}

impl IdentityResolver {
    pub fn new(
        registry: Arc<dyn PersonRegistry>,
        confidentiality: Arc<dyn ConfidentialityCheck>,
        metrics: Arc<dyn MetricsPort>,
    ) -> Self {
        Self {
            registry,
            confidentiality,
            metrics,
        }
    }

    /// Resolves `candidates` to the persons relevant for this case
    ///
    /// Lookups run one at a time in candidate order. `known_id` is tried as
    /// an insured candidate only when no candidate resolves.
    ///
    /// # Errors
    ///
    /// - `IdentityNotFound` when every candidate that reached the registry
    ///   failed birthdate checks
    /// - `AmbiguousIdentity` when a single-actor case type resolves more
    ///   than one insured person
    /// - `Port` when a collaborator fails for any reason but "not found"
    pub async fn resolve(
        &self,
        known_id: Option<NationalId>,
        candidates: Vec<CandidateIdentity>,
        context: &ResolutionContext,
    ) -> Result<ResolvedIdentity, IdentityError> {
        let selection = SelectionRule::for_case_type(context.case_type);
        let unique = deduplicate(candidates);

        debug!(
            case_id = %context.case_id,
            document_id = %context.document_id,
            event_type = %context.event_type,
            unique = unique.len(),
            "resolving candidate identities"
        );

        let mut persons = Vec::new();
        let mut mismatches = 0usize;
        let mut not_found = 0usize;

        for candidate in &unique {
            match self.resolve_candidate(candidate, context).await? {
                Outcome::Resolved(person) => merge_person(&mut persons, person),
                Outcome::Mismatch => mismatches += 1,
                Outcome::NotFound => not_found += 1,
                Outcome::Unresolvable => {}
            }
        }

        if persons.is_empty() {
            if mismatches > 0 && not_found == 0 {
                warn!(case_id = %context.case_id, mismatches, "all registry hits failed birthdate validation");
                return Err(IdentityError::IdentityNotFound {
                    case_id: context.case_id.clone(),
                });
            }

            if let Some(id) = known_id.filter(|id| !unique.iter().any(|c| c.id.as_ref() == Some(id))) {
                debug!(case_id = %context.case_id, id = %id.masked(), "falling back to known id");
                let fallback = CandidateIdentity::with_id(
                    id,
                    RelationTag::Insured,
                    DocumentType::Other(KNOWN_ID_SOURCE.to_string()),
                );
                if let Outcome::Resolved(person) = self.resolve_candidate(&fallback, context).await? {
                    persons.push(person);
                }
            }
        }

        if selection == SelectionRule::SingleInsured {
            let insured = persons.iter().filter(|p| p.relation == RelationTag::Insured).count();
            if insured > 1 {
                return Err(IdentityError::AmbiguousIdentity {
                    case_type: context.case_type,
                    count: insured,
                });
            }
        }

        if persons.is_empty() {
            info!(case_id = %context.case_id, "no identity resolved, continuing as unknown person");
            self.metrics
                .increment("identity.unknown", &[("case_type", context.case_type.code())]);
            return Ok(ResolvedIdentity::unknown(selection));
        }

        let identity = ResolvedIdentity::new(persons, selection);
        info!(
            case_id = %context.case_id,
            persons = identity.persons().len(),
            multiple = identity.has_multiple_persons(),
            "identity resolved"
        );
        self.metrics
            .increment("identity.resolved", &[("case_type", context.case_type.code())]);
        Ok(identity)
    }

    async fn resolve_candidate(
        &self,
        candidate: &CandidateIdentity,
        context: &ResolutionContext,
    ) -> Result<Outcome, IdentityError> {
        let Some(record) = self.lookup(candidate, context).await? else {
            return Ok(if candidate.is_resolvable() {
                Outcome::NotFound
            } else {
                Outcome::Unresolvable
            });
        };

        let national_id = candidate.id.clone().or_else(|| record.national_id.clone());
        let birthdate = match validate_birthdate(national_id.as_ref(), candidate, &record) {
            Ok(birthdate) => birthdate,
            Err(error) => {
                warn!(case_id = %context.case_id, %error, "dropping candidate");
                self.metrics.increment("identity.birthdate.mismatch", &[]);
                return Ok(Outcome::Mismatch);
            }
        };

        let confidential = self
            .confidentiality
            .is_protected(&record.actor_id, &context.case_id, Some(context.metadata.clone()))
            .await?;

        Ok(Outcome::Resolved(ResolvedPerson {
            country_code: record.country_code(),
            actor_id: record.actor_id,
            national_id,
            relation: candidate.relation,
            benefit_type: candidate.benefit_type_hint,
            birthdate,
            geographic_unit: record.geographic_unit,
            confidential,
            related_persons: Vec::new(),
        }))
    }

    async fn lookup(
        &self,
        candidate: &CandidateIdentity,
        context: &ResolutionContext,
    ) -> Result<Option<PersonRecord>, PortError> {
        let metadata = Some(context.metadata.clone());

        let found = match (&candidate.id, &candidate.search_fallback) {
            (Some(id), _) => self.registry.find(id, metadata).await?,
            (None, Some(fallback)) => {
                self.registry
                    .find_by_name_and_birthdate(&fallback.name, fallback.birthdate, metadata)
                    .await?
            }
            (None, None) => return Ok(None),
        };

        if found.is_none() {
            warn!(
                case_id = %context.case_id,
                relation = %candidate.relation,
                source = %candidate.source_document_type,
                "person not found in registry"
            );
            self.metrics.increment("identity.lookup.not_found", &[]);
        }
        Ok(found)
    }
}

/// Keeps the first candidate per national id; a later duplicate only fills
/// in a missing benefit hint. Candidates without an id are all kept.
fn deduplicate(candidates: Vec<CandidateIdentity>) -> Vec<CandidateIdentity> {
    let mut unique: Vec<CandidateIdentity> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let existing = candidate
            .id
            .as_ref()
            .and_then(|id| unique.iter().position(|u| u.id.as_ref() == Some(id)));

        match existing {
            Some(index) => {
                if unique[index].benefit_type_hint.is_none() {
                    unique[index].benefit_type_hint = candidate.benefit_type_hint;
                }
            }
            None => unique.push(candidate),
        }
    }

    unique
}

/// Adds `person` unless the registry already gave the same person for an
/// earlier candidate, in which case only a missing benefit hint is taken
fn merge_person(persons: &mut Vec<ResolvedPerson>, person: ResolvedPerson) {
    let existing = persons.iter_mut().find(|p| {
        (p.national_id.is_some() && p.national_id == person.national_id)
            || (person.has_actor_id() && p.actor_id == person.actor_id)
    });

    match existing {
        Some(existing) => {
            if existing.benefit_type.is_none() {
                existing.benefit_type = person.benefit_type;
            }
        }
        None => persons.push(person),
    }
}

/// Checks the encoded birthdate against registry and document birthdates
///
/// Returns the birthdate to carry forward: encoded, else registry, else
/// document.
fn validate_birthdate(
    national_id: Option<&NationalId>,
    candidate: &CandidateIdentity,
    record: &PersonRecord,
) -> Result<Option<NaiveDate>, IdentityError> {
    let Some(id) = national_id else {
        return Ok(record.birthdate.or(candidate.birthdate));
    };
    let encoded = id.birthdate();

    for (source_name, other) in [("registry", record.birthdate), ("document", candidate.birthdate)] {
        if let Some(other) = other {
            if other != encoded {
                return Err(IdentityError::BirthdateMismatch {
                    masked_id: id.masked(),
                    encoded,
                    other,
                    source_name,
                });
            }
        }
    }

    Ok(Some(encoded))
}
