//! Error types for the activity verifier core.
//!
//! Three kinds of failure exist in the core. Only `Validation` is allowed to
//! escape the aggregator; `Connection` and `Contract` are absorbed by the
//! individual verifiers and degrade that check's result to `false`.

use thiserror::Error;

/// Failure kinds raised by the verifier core.
#[derive(Debug, Error)]
pub enum VerifierError {
    /// The input address is malformed. Raised before any network call and
    /// always surfaced to the caller, never converted to a `false` result.
    #[error("invalid address: {0}")]
    Validation(String),

    /// The chain endpoint is unreachable, timed out, or returned a response
    /// the client could not parse.
    #[error("connection error: {0}")]
    Connection(String),

    /// The target contract rejected the call: function/event absent, call
    /// reverted, or the node returned a JSON-RPC error object.
    #[error("contract error: {0}")]
    Contract(String),
}

impl VerifierError {
    /// Short machine-readable kind name, used in the API error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            VerifierError::Validation(_) => "ValidationError",
            VerifierError::Connection(_) => "ConnectionError",
            VerifierError::Contract(_) => "ContractError",
        }
    }
}
