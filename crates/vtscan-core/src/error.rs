//! Centralized error types for vtscan.

use thiserror::Error;

/// Failure of a URL scan, tagged by the stage that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("API key not configured")]
    CredentialMissing,

    #[error("Scan submission failed: {0}")]
    Submission(String),

    #[error("Report request failed: {0}")]
    Report(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Report not ready after {attempts} attempt(s)")]
    ReportNotReady { attempts: u32 },

    #[error("Scan cancelled")]
    Cancelled,
}

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    /// Create a submission error.
    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    /// Create a report error.
    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }

    /// Create a malformed response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

/// Failure of the credential storage layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt storage: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
