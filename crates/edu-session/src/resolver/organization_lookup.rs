use crate::resolver::{ResolutionSource, ResolutionStrategy, ResolveRequest};
use crate::{OrganizationSource, ResolveError, ResolveResult};

use edu_core::{Clock, TenantKey};

use std::panic::Location;
use std::sync::Arc;

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::debug;

/// Tenant key from the subdomain of the user's organization.
///
/// An expired credential is treated as absent and the lookup runs
/// anonymously.
pub struct OrganizationLookup {
    organizations: Arc<dyn OrganizationSource>,
    clock: Arc<dyn Clock>,
}

impl OrganizationLookup {
    pub fn new(organizations: Arc<dyn OrganizationSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            organizations,
            clock,
        }
    }
}

#[async_trait]
impl ResolutionStrategy for OrganizationLookup {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Organization
    }

    async fn attempt(&self, request: &ResolveRequest<'_>) -> ResolveResult<TenantKey> {
        let Some(organization_id) = request.organization_id else {
            return Err(ResolveError::not_applicable(
                "organization",
                "no organization id",
            ));
        };

        let now = self.clock.now();
        let credential = request.credential.filter(|c| !c.is_expired(now));
        if request.credential.is_some() && credential.is_none() {
            debug!("Credential expired, looking up organization {organization_id} anonymously");
        }

        let organization = self
            .organizations
            .fetch_organization(organization_id, credential)
            .await?;

        organization
            .tenant_key()
            .ok_or_else(|| ResolveError::MissingSubdomain {
                organization_id: organization_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
