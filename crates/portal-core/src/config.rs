//! Startup configuration for the portal
//!
//! Values come from the host environment at startup. Missing store
//! credentials are a hard constructor error; a missing passphrase is
//! carried as `None` and fails authentication closed at first use; a
//! missing relay user id downgrades chat notifications to a no-op.

use thiserror::Error;

/// Configuration captured once at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalConfig {
    /// Remote document store endpoint
    pub store_url: String,
    /// API key sent with every store request
    pub store_key: String,
    /// Shared access passphrase; `None` denies all authentication
    pub passphrase: Option<String>,
    /// Chat user id the relay mentions; `None` disables notifications
    pub relay_user_id: Option<String>,
}

/// Fatal configuration failure
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing store configuration. Set the store URL and API key in the deployment environment.")]
    MissingStoreCredentials,
}

impl PortalConfig {
    /// Build the configuration from host-provided values.
    ///
    /// Empty strings are treated the same as absent values.
    pub fn from_values(
        store_url: Option<String>,
        store_key: Option<String>,
        passphrase: Option<String>,
        relay_user_id: Option<String>,
    ) -> Result<Self, ConfigError> {
        let store_url = non_empty(store_url).ok_or(ConfigError::MissingStoreCredentials)?;
        let store_key = non_empty(store_key).ok_or(ConfigError::MissingStoreCredentials)?;

        Ok(Self {
            store_url,
            store_key,
            passphrase: non_empty(passphrase),
            relay_user_id: non_empty(relay_user_id),
        })
    }

    /// True when chat notifications can be relayed
    pub fn has_relay_user(&self) -> bool {
        self.relay_user_id.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
