//! Core error types used across the system

use thiserror::Error;
use crate::codes::UnknownCode;
use crate::national_id::NationalIdError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("National id error: {0}")]
    NationalId(#[from] NationalIdError),

    #[error("Code error: {0}")]
    Code(#[from] UnknownCode),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}
