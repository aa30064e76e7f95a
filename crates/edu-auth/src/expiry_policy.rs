/// What `TokenStore::read` does with a record it finds expired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryPolicy {
    /// Delete the expired (or malformed) record as part of the read
    #[default]
    Purge,
    /// Report it as absent and leave it in storage until `clear()`
    Retain,
}

impl ExpiryPolicy {
    pub fn from_purge_flag(purge: bool) -> Self {
        if purge { Self::Purge } else { Self::Retain }
    }
}
