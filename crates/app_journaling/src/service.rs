//! Journaling service
//!
//! Processes one case document event from fetched documents to a routing
//! decision. Collaborator calls are awaited one at a time, in document and
//! candidate order.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use core_kernel::{
    CaseId, CaseType, DocumentId, DocumentType, EventType, MetricsPort, NationalId,
    OperationMetadata, ProcessingId,
};
use domain_document::{CandidateIdentityCollector, DocumentStore, StructuredDocument};
use domain_identity::{
    ConfidentialityCheck, IdentityResolver, PersonRegistry, ResolutionContext, ResolvedIdentity,
};
use domain_routing::{CaseRecord, CaseRecordStore, RoutingDecision, RoutingEngine, RoutingRequest};

use crate::error::JournalingError;

/// An inbound case document event, as far as the core reads it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEvent {
    pub case_id: CaseId,
    /// Case type code as sent by the transport, e.g. `P_BUC_01`
    pub case_type: String,
    pub document_id: DocumentId,
    pub document_type: DocumentType,
    pub event_type: EventType,
    /// Country of the sending institution
    pub sender_country: Option<String>,
    /// A national id already known from the event, if any
    pub known_id: Option<NationalId>,
    /// Every document of the case, in case order
    ///
    /// When empty, only `document_id` is read.
    #[serde(default)]
    pub document_ids: Vec<DocumentId>,
}

impl DocumentEvent {
    fn documents_to_read(&self) -> Vec<DocumentId> {
        if self.document_ids.is_empty() {
            vec![self.document_id.clone()]
        } else {
            self.document_ids.clone()
        }
    }
}

/// Result of processing one event, handed to journaling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalingOutcome {
    pub processing_id: ProcessingId,
    pub identity: ResolvedIdentity,
    pub case_record: Option<CaseRecord>,
    pub decision: RoutingDecision,
}

/// Runs the collect, resolve and route pipeline
pub struct JournalingService {
    documents: Arc<dyn DocumentStore>,
    case_records: Arc<dyn CaseRecordStore>,
    collector: CandidateIdentityCollector,
    resolver: IdentityResolver,
    engine: RoutingEngine,
    metrics: Arc<dyn MetricsPort>,
}

impl JournalingService {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        registry: Arc<dyn PersonRegistry>,
        confidentiality: Arc<dyn ConfidentialityCheck>,
        case_records: Arc<dyn CaseRecordStore>,
        engine: RoutingEngine,
        metrics: Arc<dyn MetricsPort>,
    ) -> Self {
        Self {
            documents,
            case_records,
            collector: CandidateIdentityCollector::default(),
            resolver: IdentityResolver::new(registry, confidentiality, metrics.clone()),
            engine,
            metrics,
        }
    }

    /// Processes one event
    ///
    /// `decision_date` is the date ages are computed against, normally
    /// today.
    ///
    /// # Errors
    ///
    /// Any failure is fatal for the event and returned unchanged; nothing is
    /// retried here.
    #[instrument(
        skip(self, event),
        fields(case_id = %event.case_id, document_id = %event.document_id, case_type = %event.case_type)
    )]
    pub async fn process(
        &self,
        event: &DocumentEvent,
        decision_date: NaiveDate,
    ) -> Result<JournalingOutcome, JournalingError> {
        let processing_id = ProcessingId::new_v7();
        let metadata = OperationMetadata::with_correlation_id(processing_id.to_string())
            .with_context("case_id", event.case_id.as_str());

        let case_type: CaseType = event.case_type.parse()?;

        let documents = self.fetch_documents(event, &metadata).await?;
        let candidates = self.collector.collect(&event.case_id, &documents)?;

        let context = ResolutionContext::new(
            event.case_id.clone(),
            case_type,
            event.event_type,
            event.document_id.clone(),
        )
        .with_metadata(metadata.clone());
        let identity = self
            .resolver
            .resolve(event.known_id.clone(), candidates, &context)
            .await?;

        let case_record = self.find_case_record(&identity, &metadata).await?;

        let mut builder = RoutingRequest::builder(
            case_type,
            event.event_type,
            event.document_type.clone(),
            decision_date,
        )
        .identity(&identity)
        .case_record(case_record.clone());
        if let Some(country) = &event.sender_country {
            builder = builder.sender_country(country.as_str());
        }
        let request = builder.build();

        let decision = self.engine.decide(&request)?;

        info!(
            %processing_id,
            unit = %decision.unit,
            automatic = decision.automatic,
            persons = identity.persons().len(),
            "document event processed"
        );
        self.metrics.increment(
            "journaling.processed",
            &[
                ("case_type", case_type.code()),
                ("automatic", if decision.automatic { "true" } else { "false" }),
            ],
        );

        Ok(JournalingOutcome {
            processing_id,
            identity,
            case_record,
            decision,
        })
    }

    async fn fetch_documents(
        &self,
        event: &DocumentEvent,
        metadata: &OperationMetadata,
    ) -> Result<Vec<(DocumentId, StructuredDocument)>, JournalingError> {
        let mut documents = Vec::new();

        for document_id in event.documents_to_read() {
            let document = self
                .documents
                .fetch(&event.case_id, &document_id, Some(metadata.clone()))
                .await
                .map_err(|source| {
                    warn!(%document_id, error = %source, "document fetch failed");
                    JournalingError::DocumentUnavailable {
                        document_id: document_id.clone(),
                        source,
                    }
                })?;
            documents.push((document_id, document));
        }

        Ok(documents)
    }

    /// Finds the existing case for the routing person
    async fn find_case_record(
        &self,
        identity: &ResolvedIdentity,
        metadata: &OperationMetadata,
    ) -> Result<Option<CaseRecord>, JournalingError> {
        let Some(person) = identity.routing_person().filter(|p| p.has_actor_id()) else {
            return Ok(None);
        };

        let records = self
            .case_records
            .list_cases_for_actor(&person.actor_id, Some(metadata.clone()))
            .await
            .map_err(|source| JournalingError::CaseRecordLookup {
                actor_id: person.actor_id.clone(),
                source,
            })?;

        let selected = CaseRecord::select(&records, person.benefit_type);
        if selected.is_none() && !records.is_empty() {
            warn!(cases = records.len(), "no single matching case record for actor");
        }
        Ok(selected)
    }
}
