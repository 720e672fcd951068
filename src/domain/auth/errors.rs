//! Error taxonomy for credential fetching, sign-in waiting and login.
//!
//! These errors are **adapter-centric**: they describe what went wrong from
//! the backend client's point of view, not in the identity provider's own
//! vocabulary. Provider failures are carried as [`ProviderError`] and folded
//! into the taxonomy at the point where the adapter sees them.
//!
//! # Taxonomy
//!
//! | Error | Meaning | Caller action |
//! |---|---|---|
//! | `ProviderNotReady` | provider used before it finished loading | initialize, retry |
//! | `NoActiveSession` | nobody is signed in | show sign-in |
//! | `TokenRetrievalFailed` | session exists, token mint failed | show generic error |
//! | `SignInTimeout` | interactive sign-in did not finish in time | retry or resume UI |

use std::time::Duration;

use thiserror::Error;

/// A failure reported by the identity provider itself.
///
/// Opaque to the adapter; only the message is kept. Sign-out failures reach
/// the caller as this type, unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    /// Creates a provider error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The provider's description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why a single credential fetch could not produce credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The provider client has not finished loading.
    #[error("Identity provider is not loaded")]
    ProviderNotReady,

    /// No signed-in user, or a user without a live session.
    #[error("No active session")]
    NoActiveSession,

    /// A session exists but the provider could not mint a token for it.
    #[error("Token retrieval failed: {0}")]
    TokenRetrievalFailed(String),
}

impl FetchError {
    /// Creates the error reported when the provider hands back no token.
    pub fn empty_token(template: &str) -> Self {
        Self::TokenRetrievalFailed(format!("empty token for template {}", template))
    }
}

impl From<ProviderError> for FetchError {
    fn from(err: ProviderError) -> Self {
        Self::TokenRetrievalFailed(err.message)
    }
}

/// Why waiting for an interactive sign-in ended without success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WaitError {
    /// No completion event arrived before the timeout elapsed.
    #[error("Sign-in did not complete within {0:?}")]
    Timeout(Duration),
}

/// Errors surfaced by `login()` and `login_from_cache()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The identity provider was used before it finished loading.
    #[error("Identity provider is not loaded")]
    ProviderNotReady,

    /// Nobody is signed in.
    #[error("No active session")]
    NoActiveSession,

    /// A session exists but token minting failed (bad template, transport
    /// error, empty token).
    #[error("Token retrieval failed: {0}")]
    TokenRetrievalFailed(String),

    /// Interactive sign-in did not complete in time.
    #[error("Sign-in timed out after {0:?}")]
    SignInTimeout(Duration),
}

impl AuthError {
    /// Returns true if the caller should present interactive sign-in.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, AuthError::NoActiveSession)
    }

    /// Returns true if the caller can reasonably recover and retry.
    ///
    /// Token retrieval failures usually point at misconfiguration, so they
    /// are the one kind a blind retry will not fix.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AuthError::TokenRetrievalFailed(_))
    }
}

impl From<FetchError> for AuthError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::ProviderNotReady => AuthError::ProviderNotReady,
            FetchError::NoActiveSession => AuthError::NoActiveSession,
            FetchError::TokenRetrievalFailed(reason) => AuthError::TokenRetrievalFailed(reason),
        }
    }
}

impl From<WaitError> for AuthError {
    fn from(err: WaitError) -> Self {
        match err {
            WaitError::Timeout(timeout) => AuthError::SignInTimeout(timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_reason_names_template() {
        let err = FetchError::empty_token("convex");
        assert_eq!(
            err,
            FetchError::TokenRetrievalFailed("empty token for template convex".to_string())
        );
    }

    #[test]
    fn provider_error_becomes_token_failure_with_its_message() {
        let err: FetchError = ProviderError::new("template not found").into();
        assert_eq!(
            err,
            FetchError::TokenRetrievalFailed("template not found".to_string())
        );
    }

    #[test]
    fn fetch_errors_map_one_to_one_onto_auth_errors() {
        assert_eq!(
            AuthError::from(FetchError::ProviderNotReady),
            AuthError::ProviderNotReady
        );
        assert_eq!(
            AuthError::from(FetchError::NoActiveSession),
            AuthError::NoActiveSession
        );
        assert_eq!(
            AuthError::from(FetchError::TokenRetrievalFailed("x".to_string())),
            AuthError::TokenRetrievalFailed("x".to_string())
        );
    }

    #[test]
    fn wait_timeout_becomes_sign_in_timeout() {
        let timeout = Duration::from_secs(1);
        assert_eq!(
            AuthError::from(WaitError::Timeout(timeout)),
            AuthError::SignInTimeout(timeout)
        );
    }

    #[test]
    fn token_failure_displays_reason() {
        let err = AuthError::TokenRetrievalFailed("empty token for template convex".to_string());
        assert_eq!(
            format!("{}", err),
            "Token retrieval failed: empty token for template convex"
        );
    }

    #[test]
    fn only_no_active_session_requires_sign_in() {
        assert!(AuthError::NoActiveSession.requires_sign_in());
        assert!(!AuthError::ProviderNotReady.requires_sign_in());
        assert!(!AuthError::TokenRetrievalFailed(String::new()).requires_sign_in());
        assert!(!AuthError::SignInTimeout(Duration::from_secs(1)).requires_sign_in());
    }

    #[test]
    fn token_failure_is_the_only_unrecoverable_kind() {
        assert!(AuthError::ProviderNotReady.is_recoverable());
        assert!(AuthError::NoActiveSession.is_recoverable());
        assert!(AuthError::SignInTimeout(Duration::from_secs(1)).is_recoverable());
        assert!(!AuthError::TokenRetrievalFailed("bad template".to_string()).is_recoverable());
    }
}
