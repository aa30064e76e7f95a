use crate::{ConfigError, ConfigErrorResult, DEFAULT_TOKEN_STORAGE_DIR, DEFAULT_TOKEN_STORAGE_KEY};

use std::path::Path;

use serde::Deserialize;

pub const MIN_TTL_SECS: u64 = 60;
pub const MAX_TTL_SECS: u64 = 30 * 86_400;
pub const DEFAULT_TTL_SECS: u64 = 86_400;

/// Where and how the bearer credential is persisted between runs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Directory for the credential record, relative to the config dir
    pub storage_dir: String,
    /// Storage key of the credential record
    pub key: String,
    /// Lifetime given to a credential saved without an explicit TTL
    pub ttl_secs: u64,
    /// Delete an expired record when it is read
    pub purge_expired_on_read: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            storage_dir: String::from(DEFAULT_TOKEN_STORAGE_DIR),
            key: String::from(DEFAULT_TOKEN_STORAGE_KEY),
            ttl_secs: DEFAULT_TTL_SECS,
            purge_expired_on_read: true,
        }
    }
}

impl TokenConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let dir = Path::new(&self.storage_dir);
        if dir.is_absolute() || self.storage_dir.contains("..") {
            return Err(ConfigError::token(
                "token.storage_dir must be relative and cannot contain '..'",
            ));
        }

        if self.key.is_empty()
            || !self
                .key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::token(format!(
                "token.key must be non-empty and use only letters, digits, '_' or '-', got '{}'",
                self.key
            )));
        }

        if self.ttl_secs < MIN_TTL_SECS || self.ttl_secs > MAX_TTL_SECS {
            return Err(ConfigError::token(format!(
                "token.ttl_secs must be {}-{}, got {}",
                MIN_TTL_SECS, MAX_TTL_SECS, self.ttl_secs
            )));
        }

        Ok(())
    }
}
