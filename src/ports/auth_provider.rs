//! Auth provider port - what the backend client consumes.
//!
//! This is the generic capability set a backend client needs from any
//! identity integration: obtain credentials (blocking on interactive sign-in
//! or not), sign out, and pull the bearer token out of the credentials.
//!
//! # When to Use
//!
//! - **login**: the user asked to sign in; may wait for the sign-in UI
//! - **login_from_cache**: app start / reconnect; never waits
//! - **extract_token**: attach the bearer token to a backend request
//!
//! # Example
//!
//! ```ignore
//! async fn connect(auth: Arc<dyn AuthProvider>) -> Result<String, AuthError> {
//!     let credentials = match auth.login_from_cache().await {
//!         Err(AuthError::NoActiveSession) => auth.login().await?,
//!         other => other?,
//!     };
//!     Ok(auth.extract_token(&credentials).to_string())
//! }
//! ```

use async_trait::async_trait;

use crate::domain::auth::{AuthError, Credentials, ProviderError};

/// Authentication contract exposed to the backend client.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::ProviderNotReady` before touching the provider when
///   it has not loaded
/// - Return `AuthError::NoActiveSession` from `login_from_cache` instead of
///   waiting for sign-in
/// - Propagate sign-out failures from `logout` without retrying
/// - Keep `extract_token` a pure projection of the credentials
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Obtains credentials, waiting for interactive sign-in if nobody is
    /// signed in yet.
    async fn login(&self) -> Result<Credentials, AuthError>;

    /// Obtains credentials from the provider's existing session only.
    async fn login_from_cache(&self) -> Result<Credentials, AuthError>;

    /// Signs the current user out.
    async fn logout(&self) -> Result<(), ProviderError>;

    /// Returns the bearer token carried by `credentials`.
    fn extract_token<'a>(&self, credentials: &'a Credentials) -> &'a str;
}
