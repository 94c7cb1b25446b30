use std::env;

use thiserror::Error;

/// Default deployment stage when `STAGE` is unset.
pub const DEFAULT_STAGE: &str = "dev";

/// Errors raised while loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

/// Process-wide configuration, read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// DynamoDB table receiving comment records.
    pub table_name: String,
    /// S3 bucket receiving archived envelopes.
    pub ingest_bucket: String,
    /// Deployment stage label embedded in archives (default: "dev").
    pub stage: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - DynamoDB table name (required)
    /// - `INGEST_BUCKET` - S3 bucket name (required)
    /// - `STAGE` - Deployment stage (default: "dev")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        Ok(Self {
            table_name: required("TABLE_NAME")?,
            ingest_bucket: required("INGEST_BUCKET")?,
            stage: lookup("STAGE")
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_STAGE.to_string()),
        })
    }
}
