pub mod credential;
pub mod error;
pub mod expiry_policy;
pub mod storage;
pub mod stored_credential;
pub mod token_store;

pub use credential::Credential;
pub use error::{AuthError, Result};
pub use expiry_policy::ExpiryPolicy;
pub use storage::{CredentialStorage, FileStorage, MemoryStorage};
pub use stored_credential::StoredCredential;
pub use token_store::{DEFAULT_STORAGE_KEY, TokenStore};

#[cfg(test)]
mod tests;
