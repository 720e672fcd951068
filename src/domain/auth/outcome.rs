//! Login outcome classification and the state a reactive client observes.

use super::{AuthError, Credentials};

/// Classification of a single login attempt.
///
/// Never stored; it exists so callers can branch on what happened without
/// matching every error variant.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    Success(Credentials),
    NoSession,
    TokenFailure(String),
    Timeout,
    ProviderNotReady,
}

impl AuthOutcome {
    /// Returns true for [`AuthOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }

    /// Returns the credentials if the attempt succeeded.
    pub fn credentials(&self) -> Option<&Credentials> {
        match self {
            AuthOutcome::Success(credentials) => Some(credentials),
            _ => None,
        }
    }
}

impl From<Result<Credentials, AuthError>> for AuthOutcome {
    fn from(result: Result<Credentials, AuthError>) -> Self {
        match result {
            Ok(credentials) => AuthOutcome::Success(credentials),
            Err(AuthError::NoActiveSession) => AuthOutcome::NoSession,
            Err(AuthError::TokenRetrievalFailed(reason)) => AuthOutcome::TokenFailure(reason),
            Err(AuthError::SignInTimeout(_)) => AuthOutcome::Timeout,
            Err(AuthError::ProviderNotReady) => AuthOutcome::ProviderNotReady,
        }
    }
}

/// Authentication state as seen by a reactive client.
#[derive(Debug, Clone, Default)]
pub enum AuthState {
    /// A login is in flight.
    Loading,
    /// The last login produced these credentials.
    Authenticated(Credentials),
    /// Nobody is signed in, or the last login failed.
    #[default]
    Unauthenticated,
}

impl AuthState {
    /// Returns true for [`AuthState::Authenticated`].
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// Returns true for [`AuthState::Loading`].
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading)
    }
}
