//! Mock identity provider for testing.
//!
//! Implements the `IdentityProvider` port entirely in memory so the adapter
//! can be exercised without a real identity SDK. It also counts what the
//! adapter does to it (provider reads, token requests, subscriptions) so
//! tests can assert on call patterns, not just results.
//!
//! # Example
//!
//! ```ignore
//! use auth_session_adapter::adapters::identity::MockIdentityProvider;
//!
//! // A provider with a signed-in user and a token for the "convex" template
//! let provider = MockIdentityProvider::signed_in("u1", "jwt-abc");
//!
//! // Simulate the user finishing the sign-in UI later on
//! provider.complete_sign_in("u2", "jwt-def");
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::auth::{AuthEvent, ProviderError};
use crate::ports::{AuthEventStream, IdentityProvider, ProviderSession, ProviderUser};

/// Template the convenience constructors mint tokens for.
pub const DEFAULT_MOCK_TEMPLATE: &str = "convex";

/// Buffer size of the event channel; generous enough that tests never lag.
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct ProviderState {
    loaded: bool,
    user: Option<ProviderUser>,
    session: Option<ProviderSession>,
    /// Tokens keyed by template name. A missing template mints no token.
    tokens: HashMap<String, String>,
    token_error: Option<ProviderError>,
    sign_out_error: Option<ProviderError>,
}

/// In-memory identity provider.
///
/// Starts loaded and signed out. Events are delivered over a broadcast
/// channel, so each subscription is independent and dropping it releases the
/// listener immediately.
#[derive(Debug)]
pub struct MockIdentityProvider {
    state: Mutex<ProviderState>,
    events: broadcast::Sender<AuthEvent>,
    network_calls: AtomicUsize,
    token_requests: AtomicUsize,
    subscriptions: AtomicUsize,
    sign_out_calls: AtomicUsize,
    requested_templates: Mutex<Vec<String>>,
}

impl MockIdentityProvider {
    /// Creates a loaded provider with nobody signed in.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Mutex::new(ProviderState {
                loaded: true,
                ..ProviderState::default()
            }),
            events,
            network_calls: AtomicUsize::new(0),
            token_requests: AtomicUsize::new(0),
            subscriptions: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
            requested_templates: Mutex::new(Vec::new()),
        }
    }

    /// Creates a provider with a user, a session and a token for the
    /// default template.
    pub fn signed_in(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new()
            .with_user(user_id)
            .with_session("sess-1")
            .with_token(DEFAULT_MOCK_TEMPLATE, token)
    }

    // === Builders ===

    /// Marks the provider as not yet loaded.
    pub fn not_loaded(self) -> Self {
        self.state().loaded = false;
        self
    }

    /// Sets the signed-in user.
    pub fn with_user(self, user_id: impl Into<String>) -> Self {
        self.state().user = Some(ProviderUser::new(user_id));
        self
    }

    /// Sets the active session.
    pub fn with_session(self, session_id: impl Into<String>) -> Self {
        self.state().session = Some(ProviderSession::new(session_id));
        self
    }

    /// Registers the token minted for a template.
    pub fn with_token(self, template: impl Into<String>, token: impl Into<String>) -> Self {
        self.state().tokens.insert(template.into(), token.into());
        self
    }

    /// Forces every token request to fail with the given error.
    pub fn with_token_error(self, error: ProviderError) -> Self {
        self.state().token_error = Some(error);
        self
    }

    /// Forces sign-out to fail with the given error.
    pub fn with_sign_out_error(self, error: ProviderError) -> Self {
        self.state().sign_out_error = Some(error);
        self
    }

    // === Runtime control ===

    /// Flips the readiness flag.
    pub fn set_loaded(&self, loaded: bool) {
        self.state().loaded = loaded;
    }

    /// Installs a user, session and default-template token without
    /// announcing it on the event stream.
    pub fn sign_in(&self, user_id: impl Into<String>, token: impl Into<String>) {
        let mut state = self.state();
        state.user = Some(ProviderUser::new(user_id));
        state.session = Some(ProviderSession::new("sess-1"));
        state
            .tokens
            .insert(DEFAULT_MOCK_TEMPLATE.to_string(), token.into());
    }

    /// Signs a user in and announces it with `SignInCompleted`, the way the
    /// real SDK does when the sign-in UI finishes.
    pub fn complete_sign_in(&self, user_id: impl Into<String>, token: impl Into<String>) {
        self.sign_in(user_id, token);
        self.emit(AuthEvent::SignInCompleted);
    }

    /// Publishes an event to every live subscription.
    ///
    /// Returns how many subscriptions received it.
    pub fn emit(&self, event: AuthEvent) -> usize {
        // No receivers is fine; nobody is waiting.
        self.events.send(event).unwrap_or(0)
    }

    /// Clears the forced token error.
    pub fn clear_token_error(&self) {
        self.state().token_error = None;
    }

    // === Test Helpers ===

    /// Number of user, session and token reads issued against the provider.
    pub fn network_calls(&self) -> usize {
        self.network_calls.load(Ordering::SeqCst)
    }

    /// Number of token requests.
    pub fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }

    /// Number of event subscriptions ever handed out.
    pub fn subscriptions(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }

    /// Number of event subscriptions currently alive.
    pub fn active_listeners(&self) -> usize {
        self.events.receiver_count()
    }

    /// Number of sign-out calls.
    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    /// Template names passed to token requests, in call order.
    pub fn requested_templates(&self) -> Vec<String> {
        self.requested_templates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn state(&self) -> MutexGuard<'_, ProviderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_network_call(&self) {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn is_loaded(&self) -> bool {
        self.state().loaded
    }

    async fn current_user(&self) -> Option<ProviderUser> {
        self.record_network_call();
        self.state().user.clone()
    }

    async fn current_session(&self) -> Option<ProviderSession> {
        self.record_network_call();
        self.state().session.clone()
    }

    async fn get_token(
        &self,
        _session: &ProviderSession,
        template: &str,
    ) -> Result<Option<String>, ProviderError> {
        self.record_network_call();
        self.token_requests.fetch_add(1, Ordering::SeqCst);
        self.requested_templates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(template.to_string());

        let state = self.state();
        if let Some(error) = state.token_error.clone() {
            return Err(error);
        }
        Ok(state.tokens.get(template).cloned())
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        {
            let mut state = self.state();
            if let Some(error) = state.sign_out_error.clone() {
                return Err(error);
            }
            state.user = None;
            state.session = None;
        }
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> AuthEventStream {
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        AuthEventStream::new(self.events.subscribe())
    }
}
