//! Adapter configuration module
//!
//! The adapter itself only ever receives an [`AdapterConfig`]; it never reads
//! the environment. Host applications that want environment-driven settings
//! can load an [`AuthConfig`] with the `config` and `dotenvy` crates and
//! convert it. Variables use the `AUTH_ADAPTER` prefix and `__` separators.
//!
//! # Example
//!
//! ```no_run
//! use auth_session_adapter::application::AdapterConfig;
//! use auth_session_adapter::config::AuthConfig;
//!
//! let config = AuthConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let adapter_config = AdapterConfig::from(config);
//! ```
//!
//! [`AdapterConfig`]: crate::application::AdapterConfig

mod auth;
mod error;

pub use auth::{AuthConfig, MAX_SIGN_IN_TIMEOUT_SECS};
pub use error::{ConfigError, ValidationError};

/// Environment variable prefix for adapter settings.
pub const ENV_PREFIX: &str = "AUTH_ADAPTER";

impl AuthConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AUTH_ADAPTER` prefix
    /// 3. Falls back to defaults for anything unset
    ///
    /// # Environment Variable Format
    ///
    /// - `AUTH_ADAPTER__TEMPLATE_NAME=convex` -> `template_name = "convex"`
    /// - `AUTH_ADAPTER__SIGN_IN_TIMEOUT_SECS=60` -> `sign_in_timeout_secs = 60`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load from the environment and validate in one step.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` for unparseable values and
    /// `ConfigError::ValidationFailed` for out-of-range ones.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }
}
