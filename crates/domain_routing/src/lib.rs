//! Case Routing Domain
//!
//! This crate decides which organizational unit handles a case document
//! and whether it can be journaled without a caseworker.
//!
//! # Rule order
//!
//! Strict confidentiality always wins. Received documents are never
//! journaled automatically. Automatic journaling also needs an actor id,
//! an existing case and, for most case types, a benefit type. Anything
//! not journaled automatically is routed by residency and age.

pub mod case;
pub mod unit;
pub mod request;
pub mod handlers;
pub mod engine;
pub mod config;
pub mod error;
pub mod ports;

pub use case::CaseRecord;
pub use unit::{OrganizationalUnit, RoutingDecision};
pub use request::{RoutingRequest, RoutingRequestBuilder};
pub use handlers::{AgeBracket, BilateralRule, CaseHandler};
pub use engine::RoutingEngine;
pub use config::RoutingConfig;
pub use error::RoutingError;
pub use ports::CaseRecordStore;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryCaseRecordStore;
