//! Configuration loading and validation for the `confseal` CLI.
//!
//! Values are read from `CONFSEAL_*` environment variables. Command-line
//! flags take precedence; see [`crate::source::KeySource::resolve`].

use anyhow::{Context, Result};
use serde::Deserialize;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Validated CLI configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Tracing log level (e.g. `"warn"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `text` or `json`.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Base64-encoded key literal.
    #[serde(default)]
    pub key: Option<String>,

    /// Path to a file holding a base64-encoded key.
    #[serde(default)]
    pub key_file: Option<String>,

    /// Passphrase for key derivation. Requires `salt`.
    #[serde(default)]
    pub passphrase: Option<String>,

    /// Salt for key derivation. Requires `passphrase`.
    #[serde(default)]
    pub salt: Option<String>,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            key: None,
            key_file: None,
            passphrase: None,
            salt: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material and passphrases are reported only as present/absent.
        f.debug_struct("Config")
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("key_file", &self.key_file)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .field("salt", &self.salt.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the combination of
    /// key settings is invalid.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("CONFSEAL"))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("CONFSEAL_LOG_LEVEL must not be empty");
        }

        let sources = [
            self.key.is_some(),
            self.key_file.is_some(),
            self.passphrase.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();
        if sources > 1 {
            anyhow::bail!(
                "only one of CONFSEAL_KEY, CONFSEAL_KEY_FILE or CONFSEAL_PASSPHRASE may be set"
            );
        }

        match (&self.passphrase, &self.salt) {
            (Some(_), None) => anyhow::bail!("CONFSEAL_PASSPHRASE requires CONFSEAL_SALT"),
            (None, Some(_)) => anyhow::bail!("CONFSEAL_SALT requires CONFSEAL_PASSPHRASE"),
            _ => Ok(()),
        }
    }
}
