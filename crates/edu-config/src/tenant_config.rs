use crate::{ConfigError, ConfigErrorResult, DEFAULT_TENANT_KEY};

use edu_core::TenantKey;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TenantConfig {
    /// Tenant shown when neither the user nor the host name selects one
    pub default_key: String,
    /// Host name the page is served from, e.g. "acme.example.com"
    pub host: Option<String>,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            default_key: String::from(DEFAULT_TENANT_KEY),
            host: None,
        }
    }
}

impl TenantConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.default_key()?;
        Ok(())
    }

    /// Parsed default key
    pub fn default_key(&self) -> ConfigErrorResult<TenantKey> {
        TenantKey::new(&self.default_key)
            .map_err(|e| ConfigError::tenant(format!("tenant.default_key is invalid: {e}")))
    }
}
