//! Encoder error types and handling

use thiserror::Error;

/// Errors surfaced by encode and preview operations
#[derive(Error, Debug)]
pub enum FormError {
    /// An operation was invoked before its inputs were set
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// The encoder could not produce a binary body or content type
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A form part could not be turned into a multipart part
    #[error("Invalid part: {0}")]
    InvalidPart(String),

    /// Encoder configuration was rejected
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Error raised by reqwest while building or reading the body
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// URL parse error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type for encode operations
pub type FormResult<T> = Result<T, FormError>;

/// Error category for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller invoked an operation without the required input
    Precondition,
    /// The encoder lacks a capability the operation needs
    Unsupported,
    /// Invalid request, part or configuration
    Request,
    /// Unknown/other errors
    Unknown,
}

impl FormError {
    /// Categorize the error for reporting
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormError::PreconditionFailed(_) => ErrorCategory::Precondition,
            FormError::UnsupportedOperation(_) => ErrorCategory::Unsupported,
            FormError::InvalidPart(_) | FormError::InvalidConfig(_) | FormError::UrlParse(_) => {
                ErrorCategory::Request
            }
            FormError::Reqwest(e) => {
                if e.is_builder() || e.is_request() {
                    ErrorCategory::Request
                } else {
                    ErrorCategory::Unknown
                }
            }
        }
    }

    /// Returns true if the error was caused by missing caller input
    pub fn is_precondition(&self) -> bool {
        matches!(self, FormError::PreconditionFailed(_))
    }

    /// Returns true if the error was caused by a missing encoder capability
    pub fn is_unsupported(&self) -> bool {
        matches!(self, FormError::UnsupportedOperation(_))
    }
}
