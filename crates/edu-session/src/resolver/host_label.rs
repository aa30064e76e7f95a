use crate::resolver::{ResolutionSource, ResolutionStrategy, ResolveRequest};
use crate::{ResolveError, ResolveResult};

use edu_core::TenantKey;

use std::net::Ipv4Addr;
use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;

/// Tenant key from the first label of the page host
/// (`acme.school.example` → `acme`)
#[derive(Debug, Clone)]
pub struct HostLabel {
    host: Option<String>,
}

impl HostLabel {
    pub fn new(host: Option<String>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl ResolutionStrategy for HostLabel {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Host
    }

    async fn attempt(&self, _request: &ResolveRequest<'_>) -> ResolveResult<TenantKey> {
        let Some(host) = self.host.as_deref() else {
            return Err(ResolveError::not_applicable("host", "no host"));
        };

        tenant_from_host(host).ok_or_else(|| ResolveError::UnusableHost {
            host: host.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// First label of a dotted host name, if the host has at least two labels
/// and none of them is empty.
///
/// The port is ignored. Bracketed IPv6 and dotted IPv4 literals never name a
/// tenant.
pub fn tenant_from_host(host: &str) -> Option<TenantKey> {
    let host = host.trim();
    if host.starts_with('[') {
        return None;
    }

    let name = host.split_once(':').map_or(host, |(name, _port)| name);
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.parse::<Ipv4Addr>().is_ok() {
        return None;
    }

    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return None;
    }

    TenantKey::new(labels[0]).ok()
}
