//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the adapter core and the outside world.
//!
//! ## Consumed
//!
//! - `IdentityProvider` - session, token and event access on the identity SDK
//! - `AuthEventStream` - cancellable subscription to provider lifecycle events
//!
//! ## Exposed
//!
//! - `AuthProvider` - the capability set a backend client authenticates with

mod auth_provider;
mod identity_provider;

pub use auth_provider::AuthProvider;
pub use identity_provider::{AuthEventStream, IdentityProvider, ProviderSession, ProviderUser};
