use crate::ResolveResult;
use crate::resolver::{ResolutionSource, ResolutionStrategy, ResolveRequest};

use edu_core::TenantKey;

use async_trait::async_trait;

/// Always succeeds with the configured key
#[derive(Debug, Clone)]
pub struct DefaultKey {
    key: TenantKey,
}

impl DefaultKey {
    pub fn new(key: TenantKey) -> Self {
        Self { key }
    }
}

#[async_trait]
impl ResolutionStrategy for DefaultKey {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Default
    }

    async fn attempt(&self, _request: &ResolveRequest<'_>) -> ResolveResult<TenantKey> {
        Ok(self.key.clone())
    }
}
