//! Session lifecycle events emitted by the identity provider.

/// A lifecycle event observed on the provider's event stream.
///
/// Providers may emit kinds this crate does not know about; those arrive as
/// [`AuthEvent::Other`] and are ignored by the sign-in waiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// An interactive sign-in finished and a session is now active.
    SignInCompleted,
    /// A new account was created and signed in.
    SignUpCompleted,
    /// The active session was closed.
    SignedOut,
    /// Any other provider event, tagged with the provider's name for it.
    Other(String),
}

impl AuthEvent {
    /// Returns true if this event means an interactive sign-in finished.
    pub fn completes_sign_in(&self) -> bool {
        matches!(self, AuthEvent::SignInCompleted | AuthEvent::SignUpCompleted)
    }
}
