//! Identity Resolution Domain
//!
//! This crate confirms the persons named in case documents against the
//! person registry and selects who the case concerns.
//!
//! # Selection
//!
//! Most case types allow a single insured person; recovery cases carry
//! several persons and route on the first one found. The journal subject is
//! picked by relation: survivor, then insured, then everyone else.

pub mod person;
pub mod identity;
pub mod resolver;
pub mod error;
pub mod ports;

pub use person::{PersonRecord, ResolvedPerson, Residency};
pub use identity::{ResolvedIdentity, SelectionRule};
pub use resolver::{IdentityResolver, ResolutionContext};
pub use error::IdentityError;
pub use ports::{ConfidentialityCheck, PersonRegistry, PersonRegistryExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{InMemoryPersonRegistry, StaticConfidentiality};
