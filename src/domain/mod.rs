//! Domain layer containing the adapter's vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `auth` - Credentials, lifecycle events, error taxonomy and auth state

pub mod auth;
pub mod foundation;
