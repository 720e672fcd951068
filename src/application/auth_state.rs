//! AuthStateTracker - publishes authenticated / unauthenticated / loading
//! transitions for a reactive client.
//!
//! The tracker drives any [`AuthProvider`] and mirrors each attempt onto a
//! `watch` channel: `Loading` while the attempt is in flight, then
//! `Authenticated` or `Unauthenticated` depending on the result. UI layers
//! subscribe to the channel instead of threading results around by hand.
//!
//! Every attempt takes a generation number. Only the newest attempt may
//! publish its final state, and an attempt dropped before it finishes puts
//! back the state it replaced.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::auth::{AuthError, AuthOutcome, AuthState, Credentials, ProviderError};
use crate::ports::AuthProvider;

/// Tracks the authentication state produced by an [`AuthProvider`].
pub struct AuthStateTracker {
    provider: Arc<dyn AuthProvider>,
    state: watch::Sender<AuthState>,
    generation: AtomicU64,
}

impl AuthStateTracker {
    /// Create a tracker that starts out `Unauthenticated`.
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let (state, _) = watch::channel(AuthState::Unauthenticated);
        Self {
            provider,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Interactive login; may wait for the sign-in UI.
    pub async fn login(&self) -> AuthOutcome {
        self.track(self.provider.login()).await
    }

    /// Restore a session the provider already has; never waits.
    pub async fn login_from_cache(&self) -> AuthOutcome {
        self.track(self.provider.login_from_cache()).await
    }

    /// Sign out. The state only moves to `Unauthenticated` if the provider
    /// accepted the sign-out.
    ///
    /// # Errors
    ///
    /// Returns the provider's sign-out error unmodified.
    pub async fn logout(&self) -> Result<(), ProviderError> {
        self.provider.logout().await?;
        // Supersedes any login still in flight.
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(AuthState::Unauthenticated);
        Ok(())
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Bearer token of the current credentials, if authenticated.
    pub fn current_token(&self) -> Option<String> {
        match &*self.state.borrow() {
            AuthState::Authenticated(credentials) => {
                Some(self.provider.extract_token(credentials).to_string())
            }
            _ => None,
        }
    }

    async fn track<F>(&self, attempt: F) -> AuthOutcome
    where
        F: Future<Output = Result<Credentials, AuthError>>,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let previous = self.state.send_replace(AuthState::Loading);
        let pending = PendingAttempt {
            tracker: self,
            generation,
            previous,
            settled: false,
        };

        let result = attempt.await;
        let next = match &result {
            Ok(credentials) => AuthState::Authenticated(credentials.clone()),
            Err(_) => AuthState::Unauthenticated,
        };
        pending.settle(next);

        AuthOutcome::from(result)
    }

    /// Publish `next` unless a newer attempt (or a logout) has started since
    /// `generation` was taken.
    fn publish(&self, generation: u64, next: AuthState) {
        let published = self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = next;
            true
        });
        if !published {
            tracing::trace!(generation, "Superseded auth attempt left state untouched");
        }
    }
}

/// Restores the pre-attempt state if the attempt's future is dropped.
struct PendingAttempt<'a> {
    tracker: &'a AuthStateTracker,
    generation: u64,
    previous: AuthState,
    settled: bool,
}

impl PendingAttempt<'_> {
    fn settle(mut self, next: AuthState) {
        self.settled = true;
        self.tracker.publish(self.generation, next);
    }
}

impl Drop for PendingAttempt<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        // A Loading left by an older attempt would never be cleared.
        let restored = match std::mem::take(&mut self.previous) {
            AuthState::Loading => AuthState::Unauthenticated,
            other => other,
        };
        tracing::debug!(generation = self.generation, "Auth attempt cancelled");
        self.tracker.publish(self.generation, restored);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockIdentityProvider;
    use crate::application::{AdapterConfig, AuthSessionAdapter};
    use crate::ports::IdentityProvider;
    use std::time::Duration;

    fn tracker(provider: &Arc<MockIdentityProvider>) -> AuthStateTracker {
        AuthStateTracker::new(Arc::new(AuthSessionAdapter::new(provider.clone())))
    }

    fn tracker_with_timeout(
        provider: &Arc<MockIdentityProvider>,
        timeout: Duration,
    ) -> AuthStateTracker {
        AuthStateTracker::new(Arc::new(AuthSessionAdapter::with_config(
            provider.clone(),
            AdapterConfig::default().with_sign_in_timeout(timeout),
        )))
    }

    #[test]
    fn tracker_starts_unauthenticated() {
        let provider = Arc::new(MockIdentityProvider::new());
        let tracker = tracker(&provider);

        assert!(matches!(tracker.state(), AuthState::Unauthenticated));
        assert!(tracker.current_token().is_none());
    }

    #[tokio::test]
    async fn successful_login_publishes_authenticated() {
        let provider = Arc::new(MockIdentityProvider::signed_in("u1", "jwt-abc"));
        let tracker = tracker(&provider);

        let outcome = tracker.login_from_cache().await;

        assert!(outcome.is_success());
        assert!(tracker.state().is_authenticated());
        assert_eq!(tracker.current_token().as_deref(), Some("jwt-abc"));
    }

    #[tokio::test]
    async fn failed_login_publishes_unauthenticated() {
        let provider = Arc::new(MockIdentityProvider::new());
        let tracker = tracker(&provider);

        let outcome = tracker.login_from_cache().await;

        assert!(matches!(outcome, AuthOutcome::NoSession));
        assert!(matches!(tracker.state(), AuthState::Unauthenticated));
    }

    #[tokio::test(start_paused = true)]
    async fn state_is_loading_while_waiting_for_sign_in() {
        let provider = Arc::new(MockIdentityProvider::new());
        let tracker = Arc::new(tracker(&provider));
        let mut states = tracker.subscribe();

        let login = tokio::spawn({
            let tracker = Arc::clone(&tracker);
            async move { tracker.login().await }
        });

        states.changed().await.unwrap();
        assert!(states.borrow_and_update().is_loading());

        tokio::time::sleep(Duration::from_secs(1)).await;
        provider.complete_sign_in("u1", "jwt-abc");

        let outcome = login.await.unwrap();
        assert!(outcome.is_success());
        assert!(tracker.state().is_authenticated());
    }

    #[tokio::test]
    async fn logout_publishes_unauthenticated() {
        let provider = Arc::new(MockIdentityProvider::signed_in("u1", "jwt-abc"));
        let tracker = tracker(&provider);
        tracker.login_from_cache().await;

        tracker.logout().await.unwrap();

        assert!(matches!(tracker.state(), AuthState::Unauthenticated));
        assert!(tracker.current_token().is_none());
    }

    #[tokio::test]
    async fn failed_logout_keeps_state() {
        let provider = Arc::new(
            MockIdentityProvider::signed_in("u1", "jwt-abc")
                .with_sign_out_error(ProviderError::new("offline")),
        );
        let tracker = tracker(&provider);
        tracker.login_from_cache().await;

        let result = tracker.logout().await;

        assert_eq!(result, Err(ProviderError::new("offline")));
        assert!(tracker.state().is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_login_does_not_leave_state_loading() {
        let provider = Arc::new(MockIdentityProvider::new());
        let tracker = tracker_with_timeout(&provider, Duration::from_secs(120));

        let result = tokio::time::timeout(Duration::from_secs(5), tracker.login()).await;
        assert!(result.is_err());

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert!(matches!(tracker.state(), AuthState::Unauthenticated));
        assert_eq!(provider.active_listeners(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_login_restores_authenticated_state() {
        let provider = Arc::new(MockIdentityProvider::signed_in("u1", "jwt-abc"));
        let tracker = tracker_with_timeout(&provider, Duration::from_secs(120));
        assert!(tracker.login_from_cache().await.is_success());

        let login = tracker.login();
        drop(login);
        // A future that was never polled never published Loading.
        assert!(tracker.state().is_authenticated());

        provider.sign_out().await.unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), tracker.login()).await;
        assert!(result.is_err());

        assert!(tracker.state().is_authenticated());
        assert_eq!(tracker.current_token().as_deref(), Some("jwt-abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_login_failure_does_not_overwrite_newer_success() {
        let provider = Arc::new(MockIdentityProvider::new());
        let tracker = Arc::new(tracker_with_timeout(&provider, Duration::from_secs(2)));

        let login = tokio::spawn({
            let tracker = Arc::clone(&tracker);
            async move { tracker.login().await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Session appears without an event; the pending login never sees it.
        provider.sign_in("u1", "jwt-abc");
        assert!(tracker.login_from_cache().await.is_success());

        let late = login.await.unwrap();
        assert!(matches!(late, AuthOutcome::Timeout));
        assert!(tracker.state().is_authenticated());
        assert_eq!(tracker.current_token().as_deref(), Some("jwt-abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn logout_supersedes_pending_login() {
        let provider = Arc::new(MockIdentityProvider::new());
        let tracker = Arc::new(tracker_with_timeout(&provider, Duration::from_secs(30)));

        let login = tokio::spawn({
            let tracker = Arc::clone(&tracker);
            async move { tracker.login().await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        tracker.logout().await.unwrap();
        provider.complete_sign_in("u1", "jwt-abc");

        assert!(login.await.unwrap().is_success());
        assert!(matches!(tracker.state(), AuthState::Unauthenticated));
    }
}
