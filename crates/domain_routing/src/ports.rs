//! Routing Domain Ports
//!
//! Routing needs the pension cases already registered for an actor. The
//! system of record sits behind `CaseRecordStore`.

use async_trait::async_trait;

use core_kernel::{ActorId, DomainPort, OperationMetadata, PortError};

use crate::case::CaseRecord;

/// Lookup of existing pension cases
#[async_trait]
pub trait CaseRecordStore: DomainPort {
    /// Lists every pension case registered for an actor
    ///
    /// An actor without cases yields an empty list, not `NotFound`.
    async fn list_cases_for_actor(
        &self,
        actor_id: &ActorId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<CaseRecord>, PortError>;
}

/// Mock implementations of the routing ports for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    /// In-memory case record store
    #[derive(Debug, Default)]
    pub struct InMemoryCaseRecordStore {
        cases: HashMap<ActorId, Vec<CaseRecord>>,
        unavailable: bool,
    }

    impl InMemoryCaseRecordStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_case(mut self, actor_id: impl Into<ActorId>, record: CaseRecord) -> Self {
            self.cases.entry(actor_id.into()).or_default().push(record);
            self
        }

        /// Makes every call fail as if the case system were down
        pub fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }
    }

    impl DomainPort for InMemoryCaseRecordStore {}

    #[async_trait]
    impl CaseRecordStore for InMemoryCaseRecordStore {
        async fn list_cases_for_actor(
            &self,
            actor_id: &ActorId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<CaseRecord>, PortError> {
            if self.unavailable {
                return Err(PortError::unavailable("case-records"));
            }
            Ok(self.cases.get(actor_id).cloned().unwrap_or_default())
        }
    }
}
