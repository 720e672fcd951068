//! Identity provider port - what the adapter consumes.
//!
//! The identity provider SDK owns accounts, sessions, token minting and the
//! interactive sign-in UI. This port is the narrow slice of it the adapter
//! needs: a readiness flag, user and session accessors, a templated token
//! request, sign-out, and a live stream of lifecycle events.
//!
//! The provider is injected into the adapter at construction, so a fake
//! implementation can stand in for it in tests.

use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::domain::auth::{AuthEvent, ProviderError};

/// The provider's record of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderUser {
    /// Provider-assigned user identifier.
    pub id: String,
}

impl ProviderUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The provider's record of the live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    /// Provider-assigned session identifier.
    pub id: String,
}

impl ProviderSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Live, cancellable subscription to provider lifecycle events.
///
/// Dropping the stream (or calling [`AuthEventStream::unsubscribe`]) tears the
/// subscription down; nothing keeps listening once the owner is gone.
#[derive(Debug)]
pub struct AuthEventStream {
    receiver: broadcast::Receiver<AuthEvent>,
}

impl AuthEventStream {
    /// Wraps a receiver obtained from the provider's event channel.
    pub fn new(receiver: broadcast::Receiver<AuthEvent>) -> Self {
        Self { receiver }
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the provider side has closed the channel. A
    /// receiver that fell behind skips the backlog it missed and keeps going.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::trace!(skipped, "Auth event stream lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Ends the subscription.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

/// Access to the identity provider's session and token lifecycle.
///
/// # Contract
///
/// Implementations must:
/// - Report `is_loaded() == false` until the SDK can answer the other calls
/// - Return `None` from `current_user`/`current_session` when signed out
/// - Return `Ok(None)` or `Ok(Some(""))` from `get_token` when no token could
///   be minted, and `Err` for transport or validation failures
/// - Hand out independent subscriptions from `subscribe`; dropping one must
///   not affect the others
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Whether the provider client has finished loading.
    async fn is_loaded(&self) -> bool;

    /// The currently signed-in user, if any.
    async fn current_user(&self) -> Option<ProviderUser>;

    /// The currently active session, if any.
    async fn current_session(&self) -> Option<ProviderSession>;

    /// Requests a token for `session`, shaped by the named template.
    async fn get_token(
        &self,
        session: &ProviderSession,
        template: &str,
    ) -> Result<Option<String>, ProviderError>;

    /// Signs the current user out.
    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// Subscribes to lifecycle events from this point on.
    fn subscribe(&self) -> AuthEventStream;
}
