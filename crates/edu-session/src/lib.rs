//! Session core: who is signed in, and which tenant's content a page shows.
//!
//! [`SessionCache`] serves the current user's profile with a freshness window
//! and single-flight fetches, [`TenantResolver`] picks the tenant key from an
//! ordered list of strategies, and [`Session`] wires both to the persisted
//! credential.

pub mod error;
pub mod resolver;
pub mod session;
pub mod session_cache;
pub mod source;

pub use error::{ResolveError, ResolveResult, SessionError, SessionResult};
pub use resolver::{
    DefaultKey, HostLabel, OrganizationLookup, Resolution, ResolutionSource, ResolutionStrategy,
    ResolveRequest, TenantResolver, tenant_from_host,
};
pub use session::{PageSession, Session};
pub use session_cache::{DEFAULT_FRESHNESS_SECS, SessionCache};
pub use source::{OrganizationSource, ProfileSource};

#[cfg(test)]
mod tests;
