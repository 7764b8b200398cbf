//! Connection configuration for the document database.

use std::time::Duration;

use crate::error::{Result, StoreError};

/// Environment variable naming the database endpoint URI.
pub const ENV_URI: &str = "FOREST_DB_URI";
/// Environment variable naming the database access key.
pub const ENV_KEY: &str = "FOREST_DB_KEY";
/// Environment variable overriding the connect/server-selection timeout.
pub const ENV_TIMEOUT: &str = "FOREST_DB_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for [`MongoStore`](crate::MongoStore).
///
/// The endpoint URI and access key are both required; the key is attached to
/// the driver credential at connect time so it never has to appear in the
/// connection string itself.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database endpoint URI (e.g. `mongodb://account@host:10255/?ssl=true`).
    pub uri: String,
    /// Account access key, used as the credential secret.
    pub key: String,
    /// Applied as both connect and server-selection timeout.
    pub timeout: Duration,
}

impl StoreConfig {
    /// Create a configuration with the default timeout.
    pub fn new(uri: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            key: key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Build a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if `FOREST_DB_URI` or `FOREST_DB_KEY`
    /// is not set. An unparseable `FOREST_DB_TIMEOUT_SECS` falls back to the
    /// default.
    pub fn from_env() -> Result<Self> {
        let uri = std::env::var(ENV_URI)
            .map_err(|_| StoreError::Config(format!("{ENV_URI} environment variable not set")))?;
        let key = std::env::var(ENV_KEY)
            .map_err(|_| StoreError::Config(format!("{ENV_KEY} environment variable not set")))?;

        let timeout_secs: u64 = std::env::var(ENV_TIMEOUT)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            uri,
            key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Override the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
