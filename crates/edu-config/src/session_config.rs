use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_FRESHNESS_SECS: u64 = 1;
pub const MAX_FRESHNESS_SECS: u64 = 86_400;
pub const DEFAULT_FRESHNESS_SECS: u64 = 300;

/// User profile cache settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a fetched profile is served without going back to the backend
    pub freshness_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            freshness_secs: DEFAULT_FRESHNESS_SECS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.freshness_secs < MIN_FRESHNESS_SECS || self.freshness_secs > MAX_FRESHNESS_SECS {
            return Err(ConfigError::session(format!(
                "session.freshness_secs must be {}-{}, got {}",
                MIN_FRESHNESS_SECS, MAX_FRESHNESS_SECS, self.freshness_secs
            )));
        }

        Ok(())
    }

    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }
}
