//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The verifier rejected the identifier/secret pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The verifier could not reach its backing service.
    #[error("credential verifier unavailable: {0}")]
    VerifierUnavailable(String),
}
