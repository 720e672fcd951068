//! Credentials handed to the backend client after a successful fetch.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::UserId;

/// A user identifier paired with a short-lived bearer token.
///
/// Built fresh on every successful fetch and never mutated. The token is
/// held in a [`SecretString`] so `Debug` output and tracing fields cannot
/// leak it by accident.
#[derive(Clone)]
pub struct Credentials {
    user_id: UserId,
    token: SecretString,
}

impl Credentials {
    /// Creates credentials for a user and the token minted for them.
    pub fn new(user_id: UserId, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: SecretString::new(token.into()),
        }
    }

    /// The provider-assigned user identifier.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The bearer token to attach to backend requests.
    pub fn token(&self) -> &str {
        self.token.expose_secret().as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
