//! Foundation module - Shared domain primitives.
//!
//! Value objects and validation errors that the auth types build on.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::UserId;
