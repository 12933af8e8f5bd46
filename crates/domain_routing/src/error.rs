//! Routing domain errors

use thiserror::Error;

use core_kernel::CaseType;

/// Errors that can occur while routing
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No handler is registered for the case type
    #[error("No routing handler registered for case type {case_type}")]
    UnknownCaseType { case_type: CaseType },
}
