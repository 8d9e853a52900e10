use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR_NAME, DatabaseConfig, LoggingConfig, ProvisioningConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub provisioning: ProvisioningConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for IDP_CONFIG_DIR env var, else use ./.idp/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply IDP_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: IDP_CONFIG_DIR env var > ./.idp/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.provisioning.validate()?;

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref filename) => {
                let config_dir = Self::config_dir()?;
                Ok(Some(config_dir.join(&self.logging.dir).join(filename)))
            }
            None => Ok(None),
        }
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  database: {} (max {} connections, busy timeout {}s)",
            self.database.path, self.database.max_connections, self.database.busy_timeout_secs
        );
        info!(
            "  auth: HS256 (secret {}), tokens expire after {}m",
            if self.auth.jwt_secret.is_some() {
                "set"
            } else {
                "missing"
            },
            self.auth.access_token_expire_minutes
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  provisioning: lookup={}x{}ms, creation={} (retry {}ms), conflict={}x{}ms, prefix={}",
            self.provisioning.lookup_attempts,
            self.provisioning.lookup_interval_ms,
            self.provisioning.creation_attempts,
            self.provisioning.retry_interval_ms,
            self.provisioning.conflict_attempts,
            self.provisioning.conflict_interval_ms,
            self.provisioning.source_prefix
        );
        warn!("  init payload signatures are NOT verified; implicit login trusts the client");
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("IDP_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("IDP_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("IDP_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "IDP_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );
        Self::apply_env_parse(
            "IDP_DATABASE_BUSY_TIMEOUT_SECS",
            &mut self.database.busy_timeout_secs,
        );

        // Auth
        Self::apply_env_option_string("IDP_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_parse(
            "IDP_AUTH_ACCESS_TOKEN_EXPIRE_MINUTES",
            &mut self.auth.access_token_expire_minutes,
        );

        // Logging
        Self::apply_env_parse("IDP_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("IDP_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("IDP_LOG_FILE", &mut self.logging.file);

        // Provisioning
        Self::apply_env_parse(
            "IDP_PROVISIONING_LOOKUP_ATTEMPTS",
            &mut self.provisioning.lookup_attempts,
        );
        Self::apply_env_parse(
            "IDP_PROVISIONING_LOOKUP_INTERVAL_MS",
            &mut self.provisioning.lookup_interval_ms,
        );
        Self::apply_env_parse(
            "IDP_PROVISIONING_CREATION_ATTEMPTS",
            &mut self.provisioning.creation_attempts,
        );
        Self::apply_env_parse(
            "IDP_PROVISIONING_CONFLICT_ATTEMPTS",
            &mut self.provisioning.conflict_attempts,
        );
        Self::apply_env_parse(
            "IDP_PROVISIONING_CONFLICT_INTERVAL_MS",
            &mut self.provisioning.conflict_interval_ms,
        );
        Self::apply_env_parse(
            "IDP_PROVISIONING_RETRY_INTERVAL_MS",
            &mut self.provisioning.retry_interval_ms,
        );
        Self::apply_env_string(
            "IDP_PROVISIONING_SOURCE_PREFIX",
            &mut self.provisioning.source_prefix,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
