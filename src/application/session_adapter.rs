//! AuthSessionAdapter - the `AuthProvider` implementation over an identity
//! provider.
//!
//! # Login flow
//!
//! ```text
//! fetch ──► Ok / ProviderNotReady / TokenRetrievalFailed ──► return
//!   │
//!   └─► NoActiveSession ──► wait for sign-in ──► Timeout ──► SignInTimeout
//!                                  │
//!                                  └─► completed ──► fetch once more ──► return
//! ```
//!
//! Each call is an independent pass through this flow. The adapter holds
//! only its immutable configuration, so concurrent calls need no locking;
//! they race against the same provider state and each gets its own result.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{CredentialFetcher, SignInWaiter};
use crate::domain::auth::{AuthError, Credentials, FetchError, ProviderError};
use crate::ports::{AuthProvider, IdentityProvider};

/// Template used when none is configured.
pub const DEFAULT_TEMPLATE_NAME: &str = "convex";

/// Interactive sign-in wait used when none is configured.
pub const DEFAULT_SIGN_IN_TIMEOUT: Duration = Duration::from_secs(120);

/// Construction-time settings for [`AuthSessionAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Token-shaping template the provider mints tokens with.
    pub template_name: String,

    /// Upper bound on the interactive sign-in wait. Does not bound the
    /// provider calls themselves.
    pub sign_in_timeout: Duration,
}

impl AdapterConfig {
    /// Set the token template name.
    pub fn with_template_name(mut self, template_name: impl Into<String>) -> Self {
        self.template_name = template_name.into();
        self
    }

    /// Set the interactive sign-in timeout.
    pub fn with_sign_in_timeout(mut self, timeout: Duration) -> Self {
        self.sign_in_timeout = timeout;
        self
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            sign_in_timeout: DEFAULT_SIGN_IN_TIMEOUT,
        }
    }
}

/// Bridges an [`IdentityProvider`] to the backend client's [`AuthProvider`]
/// contract.
///
/// # Example
///
/// ```ignore
/// let provider: Arc<dyn IdentityProvider> = Arc::new(sdk_bridge);
/// let adapter = AuthSessionAdapter::with_config(
///     provider,
///     AdapterConfig::default().with_sign_in_timeout(Duration::from_secs(60)),
/// );
///
/// let credentials = adapter.login().await?;
/// let bearer = adapter.extract_token(&credentials);
/// ```
pub struct AuthSessionAdapter {
    provider: Arc<dyn IdentityProvider>,
    fetcher: CredentialFetcher,
    waiter: SignInWaiter,
    sign_in_timeout: Duration,
}

impl AuthSessionAdapter {
    /// Create an adapter with the default template and timeout.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self::with_config(provider, AdapterConfig::default())
    }

    /// Create an adapter with custom configuration.
    pub fn with_config(provider: Arc<dyn IdentityProvider>, config: AdapterConfig) -> Self {
        Self {
            fetcher: CredentialFetcher::new(Arc::clone(&provider), config.template_name),
            waiter: SignInWaiter::new(Arc::clone(&provider)),
            provider,
            sign_in_timeout: config.sign_in_timeout,
        }
    }

    /// Template tokens are minted with.
    pub fn template_name(&self) -> &str {
        self.fetcher.template_name()
    }

    /// Bound on the interactive sign-in wait.
    pub fn sign_in_timeout(&self) -> Duration {
        self.sign_in_timeout
    }
}

#[async_trait]
impl AuthProvider for AuthSessionAdapter {
    #[tracing::instrument(name = "auth.login", skip_all, fields(template = %self.template_name()))]
    async fn login(&self) -> Result<Credentials, AuthError> {
        match self.fetcher.fetch().await {
            Err(FetchError::NoActiveSession) => {}
            other => return other.map_err(AuthError::from),
        }

        tracing::debug!(timeout = ?self.sign_in_timeout, "No active session, awaiting interactive sign-in");
        self.waiter.wait_for_completion(self.sign_in_timeout).await?;

        // Exactly one refetch. A second NoActiveSession is returned as-is
        // rather than starting another wait.
        tracing::debug!("Refetching credentials after sign-in");
        Ok(self.fetcher.fetch().await?)
    }

    #[tracing::instrument(name = "auth.login_from_cache", skip_all, fields(template = %self.template_name()))]
    async fn login_from_cache(&self) -> Result<Credentials, AuthError> {
        Ok(self.fetcher.fetch().await?)
    }

    #[tracing::instrument(name = "auth.logout", skip_all)]
    async fn logout(&self) -> Result<(), ProviderError> {
        self.provider.sign_out().await
    }

    fn extract_token<'a>(&self, credentials: &'a Credentials) -> &'a str {
        credentials.token()
    }
}
