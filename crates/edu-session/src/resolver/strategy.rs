use crate::ResolveResult;

use edu_auth::Credential;
use edu_core::{OrganizationId, TenantKey};

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

/// Inputs available to every strategy for one resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveRequest<'a> {
    /// From the signed-in user's profile, if any
    pub organization_id: Option<&'a OrganizationId>,
    pub credential: Option<&'a Credential>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Organization,
    Host,
    Default,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Host => "host",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One way of deriving a tenant key
#[async_trait]
pub trait ResolutionStrategy: Send + Sync {
    fn source(&self) -> ResolutionSource;

    /// `ResolveError::NotApplicable` when the request lacks this strategy's
    /// input; any other error is a genuine failure.
    async fn attempt(&self, request: &ResolveRequest<'_>) -> ResolveResult<TenantKey>;
}
