use edu_auth::Credential;
use edu_client::{Client, ClientResult};
use edu_core::{Organization, OrganizationId, TenantKey, UserProfile};

use async_trait::async_trait;

/// Where the session cache gets the signed-in user's profile from
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, credential: &Credential) -> ClientResult<UserProfile>;
}

/// Organization metadata and tenant content lookups
#[async_trait]
pub trait OrganizationSource: Send + Sync {
    async fn fetch_organization(
        &self,
        id: &OrganizationId,
        credential: Option<&Credential>,
    ) -> ClientResult<Organization>;

    /// Content descriptor for a tenant key; None if no organization uses it
    async fn fetch_tenant_content(
        &self,
        tenant: &TenantKey,
        credential: Option<&Credential>,
    ) -> ClientResult<Option<Organization>>;
}

#[async_trait]
impl ProfileSource for Client {
    async fn fetch_profile(&self, credential: &Credential) -> ClientResult<UserProfile> {
        self.current_user(credential).await
    }
}

#[async_trait]
impl OrganizationSource for Client {
    async fn fetch_organization(
        &self,
        id: &OrganizationId,
        credential: Option<&Credential>,
    ) -> ClientResult<Organization> {
        self.organization(id, credential).await
    }

    async fn fetch_tenant_content(
        &self,
        tenant: &TenantKey,
        credential: Option<&Credential>,
    ) -> ClientResult<Option<Organization>> {
        self.organization_by_tenant(tenant, credential).await
    }
}
