//! Client and submission error taxonomy.
//!
//! Two levels: [`ClientError`] is what every data-service operation can fail
//! with; [`SubmitError`] is only reachable through a 422 submission response
//! and is carried inside [`ClientError::Submission`].
//!
//! Failures are never retried here. Whether an operation is safe to retry is
//! known only to the caller, so retry/backoff policy lives above this crate.

use thiserror::Error;

/// Errors surfaced by data-service operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The request was flawed before any network I/O: bad base URL,
    /// unserializable body, malformed input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The service rejected the request for lack of permission.
    #[error("permission denied")]
    Permission,

    /// A service resource limit was exceeded (rate limit, data limit);
    /// callers should back off before retrying.
    #[error("resource limit exceeded")]
    Resource,

    /// The response could not be used: transport failure, missing body on a
    /// success status, schema mismatch, or an unexpected status code.
    #[error("bad response: {0}")]
    BadResponse(String),

    /// The request and response succeeded, but the network rejected the
    /// submitted transaction.
    #[error("submission failed: {0}")]
    Submission(#[from] SubmitError),

    /// The service itself is unavailable; callers may retry with backoff.
    #[error("service unavailable")]
    Unavailable,
}

/// Outcome of a rejected transaction submission.
///
/// Each variant carries the server's free-text detail message for display
/// and logging; it is never interpreted further.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The process handling the submission could not be accessed.
    #[error("submit access error: {0}")]
    Access(String),

    /// The source account was rejected.
    #[error("submit account error: {0}")]
    Account(String),

    /// The transaction signature failed verification.
    #[error("submit signature error: {0}")]
    Signature(String),

    #[error("insufficient balance: {0}")]
    InsufficientBalance(String),

    /// The network-level cost unit budget (e.g. gas) was too low.
    #[error("insufficient network cost unit: {0}")]
    InsufficientNetworkCostUnit(String),

    #[error("insufficient fee: {0}")]
    InsufficientFee(String),

    #[error("nonce too low: {0}")]
    NonceTooLow(String),

    #[error("nonce invalid: {0}")]
    NonceInvalid(String),

    #[error("transaction expired: {0}")]
    TransactionExpired(String),

    #[error("duplicate transaction: {0}")]
    TransactionDuplicate(String),

    /// Transaction rejected for a reason the service did classify, but that
    /// has no finer category here.
    #[error("transaction rejected: {0}")]
    Transaction(String),

    /// An unclassifiable submission failure; see the detail string.
    #[error("unknown submit error: {0}")]
    Unknown(String),
}

impl SubmitError {
    /// The server-supplied detail message.
    pub fn details(&self) -> &str {
        match self {
            SubmitError::Access(details)
            | SubmitError::Account(details)
            | SubmitError::Signature(details)
            | SubmitError::InsufficientBalance(details)
            | SubmitError::InsufficientNetworkCostUnit(details)
            | SubmitError::InsufficientFee(details)
            | SubmitError::NonceTooLow(details)
            | SubmitError::NonceInvalid(details)
            | SubmitError::TransactionExpired(details)
            | SubmitError::TransactionDuplicate(details)
            | SubmitError::Transaction(details)
            | SubmitError::Unknown(details) => details,
        }
    }
}

impl ClientError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::BadRequest(_) => "bad_request",
            ClientError::Permission => "permission",
            ClientError::Resource => "resource",
            ClientError::BadResponse(_) => "bad_response",
            ClientError::Submission(_) => "submission",
            ClientError::Unavailable => "unavailable",
        }
    }
}

/// Result type for data-service operations.
pub type ClientResult<T> = Result<T, ClientError>;
