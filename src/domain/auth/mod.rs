//! Authentication types for the domain layer.
//!
//! These types have **no provider dependencies**: any identity provider can
//! populate them through the `IdentityProvider` port, and any backend client
//! can consume them through the `AuthProvider` port.
//!
//! # Design Decisions
//!
//! - `Credentials` keeps the bearer token in a secret wrapper
//! - Fetch, wait and login failures each get their own error type
//! - `AuthOutcome` and `AuthState` are derived views, never persisted

mod credentials;
mod errors;
mod events;
mod outcome;

pub use credentials::Credentials;
pub use errors::{AuthError, FetchError, ProviderError, WaitError};
pub use events::AuthEvent;
pub use outcome::{AuthOutcome, AuthState};
