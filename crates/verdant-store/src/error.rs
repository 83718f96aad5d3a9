use thiserror::Error;

use verdant_shared::InviteError;

/// Errors produced by the store layer.
///
/// Every failure is local to the attempted operation: the in-memory state
/// and the persisted slots are left as they were before the call.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Rejected input (empty name, oversized message, blank credentials).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A join was attempted with an empty or malformed invite code.
    #[error("Invalid invite: {0}")]
    InvalidInvite(#[from] InviteError),

    /// A profile mutation was attempted with no active identity.
    #[error("No user is signed in")]
    Unauthenticated,

    /// The referenced server or channel does not exist. Callers are
    /// expected to check existence first; this is the backstop.
    #[error("Record not found")]
    NotFound,

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. writing a slot file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
