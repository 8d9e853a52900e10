use idp_config::ProvisioningConfig;
use idp_core::UsernamePolicy;

use std::time::Duration;

/// Attempt budgets and sleeps for [`ImplicitLoginReconciler`](crate::ImplicitLoginReconciler).
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    pub lookup_attempts: u32,
    pub lookup_interval: Duration,
    pub creation_attempts: u32,
    pub conflict_attempts: u32,
    pub conflict_interval: Duration,
    pub retry_interval: Duration,
    pub username_policy: UsernamePolicy,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self::from(&ProvisioningConfig::default())
    }
}

impl From<&ProvisioningConfig> for ReconcilerConfig {
    fn from(config: &ProvisioningConfig) -> Self {
        Self {
            lookup_attempts: config.lookup_attempts,
            lookup_interval: Duration::from_millis(config.lookup_interval_ms),
            creation_attempts: config.creation_attempts,
            conflict_attempts: config.conflict_attempts,
            conflict_interval: Duration::from_millis(config.conflict_interval_ms),
            retry_interval: Duration::from_millis(config.retry_interval_ms),
            username_policy: UsernamePolicy::new(config.source_prefix.clone()),
        }
    }
}
