use crate::{OrganizationId, TenantKey};

use serde::{Deserialize, Serialize};

/// Organization metadata and the descriptor of its public content set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subdomain: Option<String>,
    /// Marketing template the organization's pages render with
    #[serde(default)]
    pub template: Option<String>,
}

impl Organization {
    /// Tenant key from the `subdomain` field, verbatim; None when missing or
    /// blank.
    pub fn tenant_key(&self) -> Option<TenantKey> {
        self.subdomain
            .as_deref()
            .and_then(|subdomain| TenantKey::from_subdomain(subdomain).ok())
    }
}
