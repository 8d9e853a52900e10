use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Lookup phase: polling for a row written by the webhook provisioner
pub const MIN_LOOKUP_ATTEMPTS: u32 = 1;
pub const MAX_LOOKUP_ATTEMPTS: u32 = 50;
pub const DEFAULT_LOOKUP_ATTEMPTS: u32 = 10;
pub const DEFAULT_LOOKUP_INTERVAL_MS: u64 = 500;

// Creation phase
pub const MIN_CREATION_ATTEMPTS: u32 = 1;
pub const MAX_CREATION_ATTEMPTS: u32 = 10;
pub const DEFAULT_CREATION_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 500;

// Re-polling after a uuid uniqueness conflict
pub const MIN_CONFLICT_ATTEMPTS: u32 = 1;
pub const MAX_CONFLICT_ATTEMPTS: u32 = 10;
pub const DEFAULT_CONFLICT_ATTEMPTS: u32 = 3;
pub const DEFAULT_CONFLICT_INTERVAL_MS: u64 = 300;

pub const MAX_INTERVAL_MS: u64 = 10_000;

pub const DEFAULT_SOURCE_PREFIX: &str = "max";
pub const MAX_SOURCE_PREFIX_LENGTH: usize = 32;

/// Budgets for the implicit-login reconciler.
///
/// Worst-case latency of a single implicit login is bounded by
/// `lookup_attempts * lookup_interval_ms` plus the creation phase, so keep
/// these small.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvisioningConfig {
    /// How many times to look the external uuid up before creating
    pub lookup_attempts: u32,
    /// Sleep between lookups in milliseconds
    pub lookup_interval_ms: u64,
    /// Insert attempts in the creation phase
    pub creation_attempts: u32,
    /// Lookups after the store reports the uuid already exists
    pub conflict_attempts: u32,
    /// Sleep before each conflict lookup in milliseconds
    pub conflict_interval_ms: u64,
    /// Sleep after an unexpected store failure in milliseconds
    pub retry_interval_ms: u64,
    /// Namespace for generated usernames
    pub source_prefix: String,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            lookup_attempts: DEFAULT_LOOKUP_ATTEMPTS,
            lookup_interval_ms: DEFAULT_LOOKUP_INTERVAL_MS,
            creation_attempts: DEFAULT_CREATION_ATTEMPTS,
            conflict_attempts: DEFAULT_CONFLICT_ATTEMPTS,
            conflict_interval_ms: DEFAULT_CONFLICT_INTERVAL_MS,
            retry_interval_ms: DEFAULT_RETRY_INTERVAL_MS,
            source_prefix: String::from(DEFAULT_SOURCE_PREFIX),
        }
    }
}

impl ProvisioningConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        Self::check_range(
            "lookup_attempts",
            self.lookup_attempts,
            MIN_LOOKUP_ATTEMPTS,
            MAX_LOOKUP_ATTEMPTS,
        )?;
        Self::check_range(
            "creation_attempts",
            self.creation_attempts,
            MIN_CREATION_ATTEMPTS,
            MAX_CREATION_ATTEMPTS,
        )?;
        Self::check_range(
            "conflict_attempts",
            self.conflict_attempts,
            MIN_CONFLICT_ATTEMPTS,
            MAX_CONFLICT_ATTEMPTS,
        )?;

        for (name, value) in [
            ("lookup_interval_ms", self.lookup_interval_ms),
            ("conflict_interval_ms", self.conflict_interval_ms),
            ("retry_interval_ms", self.retry_interval_ms),
        ] {
            if value > MAX_INTERVAL_MS {
                return Err(ConfigError::provisioning(format!(
                    "provisioning.{} must be <= {}, got {}",
                    name, MAX_INTERVAL_MS, value
                )));
            }
        }

        if self.source_prefix.is_empty()
            || self.source_prefix.len() > MAX_SOURCE_PREFIX_LENGTH
            || !self
                .source_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::provisioning(format!(
                "provisioning.source_prefix must be 1-{} ASCII letters, digits or '_', got '{}'",
                MAX_SOURCE_PREFIX_LENGTH, self.source_prefix
            )));
        }

        Ok(())
    }

    #[track_caller]
    fn check_range(name: &str, value: u32, min: u32, max: u32) -> ConfigErrorResult<()> {
        if value < min || value > max {
            return Err(ConfigError::provisioning(format!(
                "provisioning.{} must be {}-{}, got {}",
                name, min, max, value
            )));
        }
        Ok(())
    }
}
