//! Identity Domain Ports
//!
//! The resolver depends on two collaborators:
//!
//! - **PersonRegistry**: looks persons up by national id, or searches by
//!   name and birthdate when a document carries no usable pin
//! - **ConfidentialityCheck**: tells whether a person's records must go to
//!   the restricted unit
//!
//! A registry miss is reported as `PortError::NotFound`. Every other
//! `PortError` is treated as a broken collaborator.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{ActorId, CaseId, DomainPort, NationalId, OperationMetadata, PortError};

use crate::person::PersonRecord;

/// Person registry lookups
#[async_trait]
pub trait PersonRegistry: DomainPort {
    /// Looks a person up by national id
    ///
    /// # Returns
    ///
    /// The registry record, or `PortError::NotFound`
    async fn lookup(
        &self,
        national_id: &NationalId,
        metadata: Option<OperationMetadata>,
    ) -> Result<PersonRecord, PortError>;

    /// Searches for exactly one person by full name and birthdate
    ///
    /// # Returns
    ///
    /// The single matching record, or `PortError::NotFound` when there is
    /// no unique match
    async fn search_by_name_and_birthdate(
        &self,
        name: &str,
        birthdate: NaiveDate,
        metadata: Option<OperationMetadata>,
    ) -> Result<PersonRecord, PortError>;
}

/// Extension trait for PersonRegistry turning misses into `None`
#[async_trait]
pub trait PersonRegistryExt: PersonRegistry {
    /// Looks a person up, mapping `NotFound` to `Ok(None)`
    async fn find(
        &self,
        national_id: &NationalId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<PersonRecord>, PortError> {
        match self.lookup(national_id, metadata).await {
            Ok(record) => Ok(Some(record)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Searches by name and birthdate, mapping `NotFound` to `Ok(None)`
    async fn find_by_name_and_birthdate(
        &self,
        name: &str,
        birthdate: NaiveDate,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<PersonRecord>, PortError> {
        match self.search_by_name_and_birthdate(name, birthdate, metadata).await {
            Ok(record) => Ok(Some(record)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }
}

// Blanket implementation for all PersonRegistry implementors
impl<T: PersonRegistry + ?Sized> PersonRegistryExt for T {}

/// Strict-confidentiality check for a person in a case
#[async_trait]
pub trait ConfidentialityCheck: DomainPort {
    /// Returns true when the person's records are protected
    async fn is_protected(
        &self,
        actor_id: &ActorId,
        case_id: &CaseId,
        metadata: Option<OperationMetadata>,
    ) -> Result<bool, PortError>;
}

/// Mock implementations of the identity ports for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};

    /// In-memory person registry
    #[derive(Debug, Default)]
    pub struct InMemoryPersonRegistry {
        by_id: HashMap<NationalId, PersonRecord>,
        by_name: HashMap<(String, NaiveDate), PersonRecord>,
        unavailable: bool,
    }

    impl InMemoryPersonRegistry {
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers a person, indexed by id and by name plus birthdate
        pub fn with_person(mut self, record: PersonRecord) -> Self {
            if let (Some(name), Some(birthdate)) = (record.name.clone(), record.birthdate) {
                self.by_name.insert((name, birthdate), record.clone());
            }
            if let Some(id) = record.national_id.clone() {
                self.by_id.insert(id, record);
            }
            self
        }

        /// Makes every call fail as if the registry were down
        pub fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }
    }

    impl DomainPort for InMemoryPersonRegistry {}

    #[async_trait]
    impl PersonRegistry for InMemoryPersonRegistry {
        async fn lookup(
            &self,
            national_id: &NationalId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<PersonRecord, PortError> {
            if self.unavailable {
                return Err(PortError::unavailable("person-registry"));
            }
            self.by_id
                .get(national_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Person", national_id.masked()))
        }

        async fn search_by_name_and_birthdate(
            &self,
            name: &str,
            birthdate: NaiveDate,
            _metadata: Option<OperationMetadata>,
        ) -> Result<PersonRecord, PortError> {
            if self.unavailable {
                return Err(PortError::unavailable("person-registry"));
            }
            self.by_name
                .get(&(name.to_string(), birthdate))
                .cloned()
                .ok_or_else(|| PortError::not_found("Person", format!("{name} {birthdate}")))
        }
    }

    /// Confidentiality check backed by a fixed set of protected actors
    #[derive(Debug, Default)]
    pub struct StaticConfidentiality {
        protected: HashSet<ActorId>,
    }

    impl StaticConfidentiality {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_protected(mut self, actor_id: impl Into<ActorId>) -> Self {
            self.protected.insert(actor_id.into());
            self
        }
    }

    impl DomainPort for StaticConfidentiality {}

    #[async_trait]
    impl ConfidentialityCheck for StaticConfidentiality {
        async fn is_protected(
            &self,
            actor_id: &ActorId,
            _case_id: &CaseId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<bool, PortError> {
            Ok(self.protected.contains(actor_id))
        }
    }
}
