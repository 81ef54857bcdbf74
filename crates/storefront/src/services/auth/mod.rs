//! Authentication state.
//!
//! [`AuthStore`] tracks a single process-wide "signed in" flag. It is advisory
//! UI state only and is never persisted, so it resets on restart.
//!
//! Credentials are checked by a [`CredentialVerifier`]. The default
//! [`AcceptAnyCredentials`] accepts everything; it is a placeholder for a
//! real verifier and must not be treated as a security boundary.

mod error;

pub use error::AuthError;

use secrecy::SecretString;
use tracing::instrument;

/// Checks a sign-in attempt.
pub trait CredentialVerifier: Send + Sync {
    /// Verify `secret` for `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on rejection, or another
    /// [`AuthError`] if verification could not be performed.
    fn verify(&self, identifier: &str, secret: &SecretString) -> Result<(), AuthError>;
}

/// Verifier that accepts any identifier and secret.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAnyCredentials;

impl CredentialVerifier for AcceptAnyCredentials {
    fn verify(&self, _identifier: &str, _secret: &SecretString) -> Result<(), AuthError> {
        Ok(())
    }
}

/// In-memory sign-in state.
pub struct AuthStore {
    authenticated: bool,
    verifier: Box<dyn CredentialVerifier>,
}

impl AuthStore {
    /// Create a signed-out store using `verifier`.
    #[must_use]
    pub fn new(verifier: Box<dyn CredentialVerifier>) -> Self {
        Self {
            authenticated: false,
            verifier,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Sign in. With the default verifier this always succeeds.
    ///
    /// A rejected attempt leaves the current state unchanged.
    ///
    /// # Errors
    ///
    /// Returns the verifier's [`AuthError`] if the attempt is rejected.
    #[instrument(skip(self, identifier, secret))]
    pub fn login(&mut self, identifier: &str, secret: &SecretString) -> Result<(), AuthError> {
        if let Err(e) = self.verifier.verify(identifier, secret) {
            tracing::warn!(error = %e, "Sign-in rejected");
            return Err(e);
        }
        self.authenticated = true;
        tracing::info!("Signed in");
        Ok(())
    }

    /// Sign out.
    pub fn logout(&mut self) {
        self.authenticated = false;
        tracing::info!("Signed out");
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new(Box::new(AcceptAnyCredentials))
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("authenticated", &self.authenticated)
            .finish_non_exhaustive()
    }
}
