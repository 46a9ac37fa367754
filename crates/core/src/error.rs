//! Error types for the EduAssist domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all EduAssist operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Persistence errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Teacher / student actions ---
    #[error(transparent)]
    Classroom(#[from] ClassroomError),

    // --- Chat submissions ---
    #[error(transparent)]
    Chat(#[from] ChatError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the remote assistant call.
///
/// These never reach the student: the chat flow degrades to the local
/// fallback matcher on every variant.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Response contained no assistant text")]
    MissingText,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures of the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read data file at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse data file at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to write data file at {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Failed to serialize data store: {0}")]
    Serialize(String),
}

/// Validation and lookup failures of teacher and student actions.
///
/// Every variant means "nothing was mutated".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassroomError {
    #[error("Please fill in required fields: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid class code: {0}")]
    UnknownClassCode(String),

    #[error("Refusing to {action} without confirmation")]
    ConfirmationRequired { action: String },
}

impl ClassroomError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Failures of a chat submission that happen *before* the assistant is asked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Question is empty")]
    EmptyQuestion,

    #[error("A reply is already pending for conversation {0}")]
    Busy(String),

    #[error(transparent)]
    Lookup(#[from] ClassroomError),
}
