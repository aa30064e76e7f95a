use crate::Credential;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted layout of the credential: `{ "value": "...", "expiry": <epoch millis> }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub value: String,
    pub expiry: i64,
}

impl StoredCredential {
    /// None when the record cannot describe a usable credential.
    pub fn into_credential(self) -> Option<Credential> {
        let expires_at = DateTime::<Utc>::from_timestamp_millis(self.expiry)?;
        Credential::new(self.value, expires_at).ok()
    }
}

impl From<&Credential> for StoredCredential {
    fn from(credential: &Credential) -> Self {
        Self {
            value: credential.token().to_string(),
            expiry: credential.expires_at().timestamp_millis(),
        }
    }
}
