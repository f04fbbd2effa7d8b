//! Core configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use bloom_redemption::engine::DEFAULT_HTLC_TTL_MS;

use crate::{CoreError, LogFormat};

/// Configuration for a BLOOM peg core host.
///
/// Can be loaded from a TOML file via [`CoreConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Initial locked reserve for the static reserve feed, in sats.
    #[serde(default)]
    pub bootstrap_locked_sats: u64,

    /// Lifetime of redemption payouts handed to the settlement layer.
    #[serde(default = "default_htlc_ttl_ms")]
    pub redemption_htlc_ttl_ms: u64,

    /// Attestations older than this are treated as stale.
    #[serde(default = "default_attestation_max_age_ms")]
    pub attestation_max_age_ms: u64,

    /// Signer label written into exported envelopes.
    #[serde(default = "default_signer")]
    pub signer: String,
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_htlc_ttl_ms() -> u64 {
    DEFAULT_HTLC_TTL_MS
}

fn default_attestation_max_age_ms() -> u64 {
    30 * 60 * 1000
}

fn default_signer() -> String {
    "bloom-operator".to_string()
}

impl CoreConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CoreError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CoreError> {
        toml::from_str(s).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, CoreError> {
        toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))
    }

    pub fn log_format(&self) -> Result<LogFormat, CoreError> {
        self.log_format.parse()
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            log_level: default_log_level(),
            bootstrap_locked_sats: 0,
            redemption_htlc_ttl_ms: default_htlc_ttl_ms(),
            attestation_max_age_ms: default_attestation_max_age_ms(),
            signer: default_signer(),
        }
    }
}
