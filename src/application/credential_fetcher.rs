//! CredentialFetcher - one read of provider state into `Credentials`.
//!
//! A fetch walks the provider in a fixed order and stops at the first
//! missing piece:
//!
//! 1. Provider loaded? Otherwise `ProviderNotReady` (no reads issued)
//! 2. Current user? Otherwise `NoActiveSession`
//! 3. Current session? Otherwise `NoActiveSession`, even with a user
//! 4. Token for the template? Empty or missing is `TokenRetrievalFailed`
//!
//! There are no retries here; the login flow decides what to do next.

use std::sync::Arc;

use crate::domain::auth::{Credentials, FetchError};
use crate::domain::foundation::UserId;
use crate::ports::IdentityProvider;

/// Reads the current user and session and mints a templated token.
pub struct CredentialFetcher {
    provider: Arc<dyn IdentityProvider>,
    template_name: String,
}

impl CredentialFetcher {
    pub fn new(provider: Arc<dyn IdentityProvider>, template_name: impl Into<String>) -> Self {
        Self {
            provider,
            template_name: template_name.into(),
        }
    }

    /// Template the provider shapes tokens with.
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// Produces credentials from the provider's current state.
    ///
    /// Holds no state of its own, so repeated calls are safe.
    pub async fn fetch(&self) -> Result<Credentials, FetchError> {
        if !self.provider.is_loaded().await {
            return Err(FetchError::ProviderNotReady);
        }

        let user = self
            .provider
            .current_user()
            .await
            .ok_or(FetchError::NoActiveSession)?;
        // A user record without an id cannot be attached to requests.
        let user_id = UserId::new(user.id).map_err(|_| FetchError::NoActiveSession)?;

        let session = self
            .provider
            .current_session()
            .await
            .ok_or(FetchError::NoActiveSession)?;

        let token = self
            .provider
            .get_token(&session, &self.template_name)
            .await?;

        match token {
            Some(token) if !token.is_empty() => {
                tracing::trace!(user_id = %user_id, "Credentials fetched");
                Ok(Credentials::new(user_id, token))
            }
            _ => Err(FetchError::empty_token(&self.template_name)),
        }
    }
}
