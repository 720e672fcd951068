//! SignInWaiter - suspends until interactive sign-in finishes or times out.
//!
//! The wait is a race between two branches:
//!
//! ```text
//! subscribe ──┬── event listener ── SignInCompleted / SignUpCompleted ──► Ok
//!             └── timer ─────────── timeout elapsed ───────────────────► Timeout
//! ```
//!
//! Whichever branch finishes first wins and the other is dropped before the
//! call returns, so neither the subscription nor the timer outlives it.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::auth::WaitError;
use crate::ports::IdentityProvider;

/// Waits on the provider's live event stream for a completed sign-in.
pub struct SignInWaiter {
    provider: Arc<dyn IdentityProvider>,
}

impl SignInWaiter {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Resolves once the provider reports a completed sign-in or sign-up.
    ///
    /// `SignedOut` and unrecognized events are ignored. If the provider
    /// closes its event stream, only the timer can end the wait. The timer
    /// also bounds the initial session read.
    ///
    /// # Errors
    ///
    /// Returns `WaitError::Timeout` when `timeout` elapses first.
    pub async fn wait_for_completion(&self, timeout: Duration) -> Result<(), WaitError> {
        let mut events = self.provider.subscribe();

        let completion = async {
            // Sign-in may have finished between the caller's fetch and the
            // subscription; that event is gone, so read the live session once.
            if self.provider.current_session().await.is_some() {
                tracing::debug!("Session became active before the wait started");
                return;
            }

            loop {
                match events.next().await {
                    Some(event) if event.completes_sign_in() => {
                        tracing::debug!(?event, "Interactive sign-in completed");
                        return;
                    }
                    Some(event) => {
                        tracing::trace!(?event, "Ignoring auth event while awaiting sign-in");
                    }
                    None => {
                        tracing::debug!("Auth event stream closed, waiting for timeout");
                        std::future::pending::<()>().await;
                    }
                }
            }
        };

        let result = tokio::select! {
            () = completion => Ok(()),
            () = tokio::time::sleep(timeout) => {
                tracing::debug!(?timeout, "Interactive sign-in timed out");
                Err(WaitError::Timeout(timeout))
            }
        };

        events.unsubscribe();
        result
    }
}
