use crate::{
    ApiConfig, ConfigError, ConfigErrorResult, LoggingConfig, SessionConfig, TenantConfig,
    TokenConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub tenant: TenantConfig,
    pub token: TokenConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for EDU_CONFIG_DIR env var, else use ./.edu/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply EDU_* environment variable overrides
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

        let config_path = config_dir.join("config.toml");

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
    /// Priority: EDU_CONFIG_DIR env var > ./.edu/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var("EDU_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".edu"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.api.validate()?;
        self.session.validate()?;
        self.tenant.validate()?;
        self.token.validate()?;
        Ok(())
    }

    /// Absolute directory holding the persisted credential.
    pub fn token_storage_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.token.storage_dir))
    }

    /// Absolute log file path, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref filename) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(filename),
            )),
            None => Ok(None),
        }
    }

    /// Log configuration summary (NEVER logs credentials).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  api: {} (timeout {}s)",
            self.api.base_url, self.api.timeout_secs
        );
        info!("  session: freshness={}s", self.session.freshness_secs);
        info!(
            "  tenant: default={}, host={}",
            self.tenant.default_key,
            self.tenant.host.as_deref().unwrap_or("<none>")
        );
        info!(
            "  token: dir={}, key={}, ttl={}s, purge_expired={}",
            self.token.storage_dir,
            self.token.key,
            self.token.ttl_secs,
            self.token.purge_expired_on_read
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Api
        Self::apply_env_string("EDU_API_BASE_URL", &mut self.api.base_url);
        Self::apply_env_parse("EDU_API_TIMEOUT_SECS", &mut self.api.timeout_secs);

        // Session
        Self::apply_env_parse(
            "EDU_SESSION_FRESHNESS_SECS",
            &mut self.session.freshness_secs,
        );

        // Tenant
        Self::apply_env_string("EDU_TENANT_DEFAULT_KEY", &mut self.tenant.default_key);
        Self::apply_env_option_string("EDU_TENANT_HOST", &mut self.tenant.host);

        // Token
        Self::apply_env_string("EDU_TOKEN_STORAGE_DIR", &mut self.token.storage_dir);
        Self::apply_env_string("EDU_TOKEN_KEY", &mut self.token.key);
        Self::apply_env_parse("EDU_TOKEN_TTL_SECS", &mut self.token.ttl_secs);
        Self::apply_env_bool(
            "EDU_TOKEN_PURGE_EXPIRED_ON_READ",
            &mut self.token.purge_expired_on_read,
        );

        // Logging
        Self::apply_env_parse("EDU_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("EDU_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("EDU_LOG_FILE", &mut self.logging.file);
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
