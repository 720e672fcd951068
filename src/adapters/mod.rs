//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the adapter core to external systems:
//! - `identity` - Identity provider implementations (in-memory)

pub mod identity;

pub use identity::MockIdentityProvider;
