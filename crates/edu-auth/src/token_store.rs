use crate::{
    AuthError, Credential, CredentialStorage, ExpiryPolicy, Result as AuthErrorResult,
    StoredCredential,
};

use edu_core::Clock;

use std::sync::Arc;

use chrono::TimeDelta;
use log::{debug, info, warn};

/// Fixed key the credential record lives under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "auth_token";

/// Holds the single live credential across restarts without a server-side
/// session. A new `save` overwrites whatever was there.
#[derive(Debug, Clone)]
pub struct TokenStore {
    storage: Arc<dyn CredentialStorage>,
    clock: Arc<dyn Clock>,
    key: String,
    expiry_policy: ExpiryPolicy,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn CredentialStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            key: String::from(DEFAULT_STORAGE_KEY),
            expiry_policy: ExpiryPolicy::default(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_expiry_policy(mut self, expiry_policy: ExpiryPolicy) -> Self {
        self.expiry_policy = expiry_policy;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn expiry_policy(&self) -> ExpiryPolicy {
        self.expiry_policy
    }

    /// Persist `{ value: token, expiry: now + ttl }`.
    ///
    /// A zero or negative `ttl` stores a record that is already expired, so
    /// the next `read` reports it absent.
    #[track_caller]
    pub fn save(&self, token: &str, ttl: TimeDelta) -> AuthErrorResult<Credential> {
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::invalid_ttl("ttl overflows the calendar"))?;
        let credential = Credential::new(token, expires_at)?;

        let record = serde_json::to_string(&StoredCredential::from(&credential))?;
        self.storage.store(&self.key, &record)?;

        info!("Saved credential (expires {})", credential.expires_at());
        Ok(credential)
    }

    /// The persisted credential if present, well-formed and not yet expired.
    ///
    /// Never fails: unreadable or malformed records are logged and reported
    /// as absent. Under [`ExpiryPolicy::Purge`] expired and malformed records
    /// are also deleted.
    pub fn read(&self) -> Option<Credential> {
        let raw = match self.storage.load(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read credential record '{}': {e}", self.key);
                return None;
            }
        };

        let credential = serde_json::from_str::<StoredCredential>(&raw)
            .ok()
            .and_then(StoredCredential::into_credential);

        let Some(credential) = credential else {
            warn!("Credential record '{}' is malformed", self.key);
            self.purge();
            return None;
        };

        if credential.is_expired(self.clock.now()) {
            debug!(
                "Credential record '{}' expired at {}",
                self.key,
                credential.expires_at()
            );
            self.purge();
            return None;
        }

        Some(credential)
    }

    /// Remove the persisted record.
    pub fn clear(&self) -> AuthErrorResult<()> {
        self.storage.remove(&self.key)?;
        info!("Cleared credential record '{}'", self.key);
        Ok(())
    }

    fn purge(&self) {
        if self.expiry_policy != ExpiryPolicy::Purge {
            return;
        }
        if let Err(e) = self.storage.remove(&self.key) {
            warn!("Failed to purge credential record '{}': {e}", self.key);
        }
    }
}
