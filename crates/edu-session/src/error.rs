use edu_auth::AuthError;
use edu_client::ClientError;

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// Shared by every caller that awaited the same fetch
    #[error("Profile fetch failed: {source} {location}")]
    ProfileFetch {
        #[source]
        source: Arc<ClientError>,
        location: ErrorLocation,
    },

    #[error("Profile fetch ended abnormally: {message} {location}")]
    FetchAborted {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential storage error: {source} {location}")]
    Credential {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },
}

impl SessionError {
    #[track_caller]
    pub fn profile_fetch(source: Arc<ClientError>) -> Self {
        Self::ProfileFetch {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn fetch_aborted(message: impl Into<String>) -> Self {
        Self::FetchAborted {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The backend no longer accepts the credential; re-authenticate.
    pub fn is_unauthorized(&self) -> bool {
        self.client_error()
            .is_some_and(|source| source.is_unauthorized())
    }

    pub fn client_error(&self) -> Option<&Arc<ClientError>> {
        match self {
            Self::ProfileFetch { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<AuthError> for SessionError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        Self::Credential {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Why a single tenant resolution strategy produced no key
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{strategy} strategy not applicable: {reason} {location}")]
    NotApplicable {
        strategy: &'static str,
        reason: &'static str,
        location: ErrorLocation,
    },

    #[error("Organization lookup failed: {source} {location}")]
    Lookup {
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },

    #[error("Organization {organization_id} has no usable subdomain {location}")]
    MissingSubdomain {
        organization_id: String,
        location: ErrorLocation,
    },

    #[error("Host '{host}' does not name a tenant {location}")]
    UnusableHost {
        host: String,
        location: ErrorLocation,
    },
}

impl ResolveError {
    #[track_caller]
    pub fn not_applicable(strategy: &'static str, reason: &'static str) -> Self {
        Self::NotApplicable {
            strategy,
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Missing input rather than a real failure
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable { .. })
    }
}

impl From<ClientError> for ResolveError {
    #[track_caller]
    fn from(source: ClientError) -> Self {
        Self::Lookup {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
