//! Identity provider adapters.
//!
//! Implementations of the `IdentityProvider` port:
//!
//! - `mock` - In-memory provider that doesn't require a real identity SDK

mod mock;

pub use mock::{MockIdentityProvider, DEFAULT_MOCK_TEMPLATE};
