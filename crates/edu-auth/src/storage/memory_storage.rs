use crate::storage::{CredentialStorage, is_valid_key};
use crate::{AuthError, Result as AuthErrorResult};

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Process-local storage; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryStorage {
    fn load(&self, key: &str) -> AuthErrorResult<Option<String>> {
        if !is_valid_key(key) {
            return Err(AuthError::invalid_key(key));
        }
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> AuthErrorResult<()> {
        if !is_valid_key(key) {
            return Err(AuthError::invalid_key(key));
        }
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AuthErrorResult<()> {
        if !is_valid_key(key) {
            return Err(AuthError::invalid_key(key));
        }
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
