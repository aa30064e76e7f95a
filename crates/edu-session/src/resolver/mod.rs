//! Tenant resolution for a page view.
//!
//! Strategies run in order and the first key produced wins. Resolution itself
//! never fails: a failing strategy is logged and the next one is tried, and
//! the configured default closes the chain.

mod default_key;
mod host_label;
mod organization_lookup;
mod strategy;

pub use default_key::DefaultKey;
pub use host_label::{HostLabel, tenant_from_host};
pub use organization_lookup::OrganizationLookup;
pub use strategy::{ResolutionSource, ResolutionStrategy, ResolveRequest};

use crate::OrganizationSource;

use edu_auth::Credential;
use edu_core::{Clock, OrganizationId, TenantKey};

use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

/// A tenant key and the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub key: TenantKey,
    pub source: ResolutionSource,
}

pub struct TenantResolver {
    strategies: Vec<Box<dyn ResolutionStrategy>>,
    fallback: TenantKey,
}

impl TenantResolver {
    /// An empty chain; every resolution yields `fallback` until strategies
    /// are added.
    pub fn new(fallback: TenantKey) -> Self {
        Self {
            strategies: Vec::new(),
            fallback,
        }
    }

    pub fn with_strategy(mut self, strategy: impl ResolutionStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Organization subdomain, then host label, then `default_key`.
    pub fn standard(
        organizations: Arc<dyn OrganizationSource>,
        clock: Arc<dyn Clock>,
        host: Option<String>,
        default_key: TenantKey,
    ) -> Self {
        Self::new(default_key.clone())
            .with_strategy(OrganizationLookup::new(organizations, clock))
            .with_strategy(HostLabel::new(host))
            .with_strategy(DefaultKey::new(default_key))
    }

    pub fn fallback(&self) -> &TenantKey {
        &self.fallback
    }

    pub fn sources(&self) -> Vec<ResolutionSource> {
        self.strategies.iter().map(|s| s.source()).collect()
    }

    pub async fn resolve(
        &self,
        organization_id: Option<&OrganizationId>,
        credential: Option<&Credential>,
    ) -> TenantKey {
        self.resolve_with_source(organization_id, credential)
            .await
            .key
    }

    pub async fn resolve_with_source(
        &self,
        organization_id: Option<&OrganizationId>,
        credential: Option<&Credential>,
    ) -> Resolution {
        let request = ResolveRequest {
            organization_id,
            credential,
        };

        for strategy in &self.strategies {
            match strategy.attempt(&request).await {
                Ok(key) => {
                    debug!("Resolved tenant '{key}' via {}", strategy.source());
                    return Resolution {
                        key,
                        source: strategy.source(),
                    };
                }
                Err(e) if e.is_not_applicable() => debug!("{e}"),
                Err(e) => warn!("Tenant resolution via {} failed: {e}", strategy.source()),
            }
        }

        debug!("No strategy matched, using fallback tenant '{}'", self.fallback);
        Resolution {
            key: self.fallback.clone(),
            source: ResolutionSource::Default,
        }
    }
}

impl std::fmt::Debug for TenantResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantResolver")
            .field("strategies", &self.sources())
            .field("fallback", &self.fallback)
            .finish()
    }
}
