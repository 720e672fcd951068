//! Authentication adapter configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::{AdapterConfig, DEFAULT_SIGN_IN_TIMEOUT, DEFAULT_TEMPLATE_NAME};

/// Longest interactive sign-in wait accepted by validation (one hour).
pub const MAX_SIGN_IN_TIMEOUT_SECS: u64 = 3600;

/// Authentication adapter configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// Token template name on the identity provider side
    #[serde(default = "default_template_name")]
    pub template_name: String,

    /// Interactive sign-in timeout in seconds
    #[serde(default = "default_sign_in_timeout")]
    pub sign_in_timeout_secs: u64,
}

impl AuthConfig {
    /// Get sign-in timeout as Duration
    pub fn sign_in_timeout(&self) -> Duration {
        Duration::from_secs(self.sign_in_timeout_secs)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.template_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("TEMPLATE_NAME"));
        }
        if self.sign_in_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.sign_in_timeout_secs > MAX_SIGN_IN_TIMEOUT_SECS {
            return Err(ValidationError::TimeoutTooLong {
                max_secs: MAX_SIGN_IN_TIMEOUT_SECS,
            });
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            template_name: default_template_name(),
            sign_in_timeout_secs: default_sign_in_timeout(),
        }
    }
}

impl From<AuthConfig> for AdapterConfig {
    fn from(config: AuthConfig) -> Self {
        AdapterConfig {
            sign_in_timeout: config.sign_in_timeout(),
            template_name: config.template_name,
        }
    }
}

fn default_template_name() -> String {
    DEFAULT_TEMPLATE_NAME.to_string()
}

fn default_sign_in_timeout() -> u64 {
    DEFAULT_SIGN_IN_TIMEOUT.as_secs()
}
