//! Configuration loading and validation for the `encryptor` binary.
//!
//! Values are read from `ENCRYPTOR_`-prefixed environment variables at
//! startup. Nothing here is required; every field has a default.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Environment variable prefix shared by every setting.
const ENV_PREFIX: &str = "ENCRYPTOR";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line logs.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Validated binary configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tracing filter directive (e.g. `"warn"`, `"encryptor=debug"`).
    /// `RUST_LOG` overrides it when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format: `text` or `json`.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("ENCRYPTOR_LOG_LEVEL must not be empty");
        }
        EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("ENCRYPTOR_LOG_LEVEL {:?} is not a valid filter", self.log_level))?;
        Ok(())
    }
}
