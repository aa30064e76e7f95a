use crate::{OrganizationSource, ResolutionSource, SessionCache, SessionResult, TenantResolver};

use edu_auth::{Credential, TokenStore};
use edu_core::{Organization, TenantKey, UserProfile};

use std::sync::Arc;

use chrono::TimeDelta;
use log::{info, warn};
use serde::Serialize;

/// Everything a page needs before it renders: who is signed in, which
/// tenant's content applies and that tenant's content descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct PageSession {
    pub profile: Option<UserProfile>,
    pub tenant: TenantKey,
    pub tenant_source: ResolutionSource,
    pub organization: Option<Organization>,
}

impl PageSession {
    pub fn is_authenticated(&self) -> bool {
        self.profile.is_some()
    }
}

/// Ties the persisted credential, the profile cache and tenant resolution
/// together for one host.
pub struct Session {
    token_store: TokenStore,
    cache: SessionCache,
    resolver: TenantResolver,
    organizations: Arc<dyn OrganizationSource>,
}

impl Session {
    pub fn new(
        token_store: TokenStore,
        cache: SessionCache,
        resolver: TenantResolver,
        organizations: Arc<dyn OrganizationSource>,
    ) -> Self {
        Self {
            token_store,
            cache,
            resolver,
            organizations,
        }
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.token_store
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn resolver(&self) -> &TenantResolver {
        &self.resolver
    }

    /// Persist a freshly issued token. Any profile cached for an earlier
    /// credential is dropped.
    pub fn login(&self, token: &str, ttl: TimeDelta) -> SessionResult<Credential> {
        let credential = self.token_store.save(token, ttl)?;
        self.cache.invalidate();
        info!("Signed in");
        Ok(credential)
    }

    pub fn logout(&self) -> SessionResult<()> {
        self.cache.invalidate();
        self.token_store.clear()?;
        info!("Signed out");
        Ok(())
    }

    /// The signed-in user's profile, or `None` without a live credential.
    ///
    /// When the backend rejects the credential (401/403) it is cleared along
    /// with the cache before the error is returned.
    pub async fn current_profile(&self, force_refresh: bool) -> SessionResult<Option<UserProfile>> {
        let credential = self.token_store.read();
        self.profile_for(credential.as_ref(), force_refresh).await
    }

    /// Credential, then profile, then tenant key, then tenant content.
    ///
    /// Profile failures propagate. A missing or failing content lookup only
    /// leaves `organization` empty.
    pub async fn bootstrap(&self) -> SessionResult<PageSession> {
        let credential = self.token_store.read();
        let profile = self.profile_for(credential.as_ref(), false).await?;

        let organization_id = profile.as_ref().and_then(|p| p.organization_id.as_ref());
        let resolution = self
            .resolver
            .resolve_with_source(organization_id, credential.as_ref())
            .await;

        let organization = match self
            .organizations
            .fetch_tenant_content(&resolution.key, credential.as_ref())
            .await
        {
            Ok(Some(organization)) => Some(organization),
            Ok(None) => {
                info!("No content published for tenant '{}'", resolution.key);
                None
            }
            Err(e) => {
                warn!("Failed to load content for tenant '{}': {e}", resolution.key);
                None
            }
        };

        Ok(PageSession {
            profile,
            tenant: resolution.key,
            tenant_source: resolution.source,
            organization,
        })
    }

    async fn profile_for(
        &self,
        credential: Option<&Credential>,
        force_refresh: bool,
    ) -> SessionResult<Option<UserProfile>> {
        let Some(credential) = credential else {
            self.cache.invalidate();
            return Ok(None);
        };

        match self.cache.get(credential, force_refresh).await {
            Ok(profile) => Ok(Some(profile)),
            Err(e) if e.is_unauthorized() => {
                warn!("Credential rejected by the identity backend, signing out");
                self.cache.invalidate();
                if let Err(clear_err) = self.token_store.clear() {
                    warn!("Failed to clear rejected credential: {clear_err}");
                }
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token_store", &self.token_store)
            .field("cache", &self.cache)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
