//! Application layer - the adapter's login, session-restore and logout flows.
//!
//! This layer orchestrates the identity provider port on behalf of the
//! backend client:
//!
//! - `CredentialFetcher` - one pass over provider state into credentials
//! - `SignInWaiter` - race a completed sign-in against a timeout
//! - `AuthSessionAdapter` - the `AuthProvider` state machine built from both
//! - `AuthStateTracker` - publishes auth state transitions to reactive clients

mod auth_state;
mod credential_fetcher;
mod session_adapter;
mod sign_in_waiter;

pub use auth_state::AuthStateTracker;
pub use credential_fetcher::CredentialFetcher;
pub use session_adapter::{
    AdapterConfig, AuthSessionAdapter, DEFAULT_SIGN_IN_TIMEOUT, DEFAULT_TEMPLATE_NAME,
};
pub use sign_in_waiter::SignInWaiter;
