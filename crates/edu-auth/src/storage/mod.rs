mod file_storage;
mod memory_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

use crate::Result as AuthErrorResult;

use std::fmt::Debug;

/// Durable per-origin key/value storage for the credential record.
///
/// Calls are synchronous; implementations may block on I/O.
pub trait CredentialStorage: Send + Sync + Debug {
    /// Raw record under `key`, or None if nothing is stored.
    fn load(&self, key: &str) -> AuthErrorResult<Option<String>>;

    /// Replace whatever is stored under `key`.
    fn store(&self, key: &str, value: &str) -> AuthErrorResult<()>;

    /// Remove `key`; removing a missing key succeeds.
    fn remove(&self, key: &str) -> AuthErrorResult<()>;
}

/// Keys become file names, so keep them to a safe alphabet.
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
