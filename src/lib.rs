//! Auth Session Adapter - identity provider sessions for backend clients
//!
//! This crate bridges a third-party identity provider's session and token
//! lifecycle to the generic `AuthProvider` contract a backend client
//! authenticates with: log in (waiting for interactive sign-in if needed),
//! restore a cached session, log out, and extract the bearer token.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
