use crate::{CoreError, Result as CoreErrorResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Longest label DNS allows
const MAX_TENANT_KEY_LENGTH: usize = 63;

/// Short label selecting which organization's content set to load.
///
/// Keys derived from host names are normalized to lower case DNS labels.
/// Keys taken from an organization record keep the value the backend
/// stores, only trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantKey(String);

impl TenantKey {
    #[track_caller]
    pub fn new(raw: impl AsRef<str>) -> CoreErrorResult<Self> {
        let raw = raw.as_ref();
        let normalized = raw.trim().to_ascii_lowercase();
        let caller = Location::caller();

        let invalid = |message: &str| CoreError::InvalidTenantKey {
            value: raw.to_string(),
            message: message.to_string(),
            location: ErrorLocation::from(caller),
        };

        if normalized.is_empty() {
            return Err(invalid("tenant key cannot be empty"));
        }
        if normalized.len() > MAX_TENANT_KEY_LENGTH {
            return Err(invalid("tenant key exceeds maximum length"));
        }
        if normalized.starts_with('-') || normalized.ends_with('-') {
            return Err(invalid("tenant key cannot start or end with '-'"));
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid(
                "tenant key may only contain letters, digits, '-' and '_'",
            ));
        }

        Ok(Self(normalized))
    }

    /// Key from an organization's `subdomain` field, kept as the backend
    /// stores it. Only a blank value is rejected.
    #[track_caller]
    pub fn from_subdomain(raw: impl AsRef<str>) -> CoreErrorResult<Self> {
        let raw = raw.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidTenantKey {
                value: raw.to_string(),
                message: String::from("subdomain cannot be blank"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TenantKey {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for TenantKey {
    type Error = CoreError;

    #[track_caller]
    fn try_from(value: String) -> CoreErrorResult<Self> {
        Self::new(value)
    }
}

impl From<TenantKey> for String {
    fn from(key: TenantKey) -> Self {
        key.0
    }
}

impl AsRef<str> for TenantKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
