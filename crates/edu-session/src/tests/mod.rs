mod resolver;

use crate::{OrganizationSource, ProfileSource};

use edu_auth::Credential;
use edu_client::{ClientError, ClientResult};
use edu_core::{
    ManualClock, Organization, OrganizationId, Permissions, TenantKey, UserAttributes, UserId,
    UserProfile,
};

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Semaphore;

pub(crate) fn start() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

pub(crate) fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(start()))
}

pub(crate) fn credential(token: &str) -> Credential {
    Credential::new(token, start() + TimeDelta::days(1)).unwrap()
}

pub(crate) fn key(raw: &str) -> TenantKey {
    TenantKey::new(raw).unwrap()
}

pub(crate) fn organization(id: &str, subdomain: Option<&str>) -> Organization {
    Organization {
        id: OrganizationId::new(id),
        name: Some(format!("Organization {id}")),
        subdomain: subdomain.map(str::to_string),
        template: None,
    }
}

/// Profile source that answers with a profile whose id is the token.
///
/// Fails with `failure_status` for the first `failures` calls, and for every
/// call made with `failing_token`. When gated, each fetch waits for one
/// permit on the gate first.
pub(crate) struct FakeProfiles {
    calls: AtomicUsize,
    failures: AtomicUsize,
    failure_status: u16,
    failing_token: Option<String>,
    organization_id: Option<OrganizationId>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeProfiles {
    pub(crate) fn ok() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures: AtomicUsize::new(0),
            failure_status: 500,
            failing_token: None,
            organization_id: None,
            gate: None,
        }
    }

    pub(crate) fn failing(failures: usize, status: u16) -> Self {
        Self {
            failures: AtomicUsize::new(failures),
            failure_status: status,
            ..Self::ok()
        }
    }

    pub(crate) fn failing_for(token: &str, status: u16) -> Self {
        Self {
            failure_status: status,
            failing_token: Some(token.to_string()),
            ..Self::ok()
        }
    }

    pub(crate) fn with_organization(mut self, id: &str) -> Self {
        self.organization_id = Some(OrganizationId::new(id));
        self
    }

    pub(crate) fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileSource for FakeProfiles {
    async fn fetch_profile(&self, credential: &Credential) -> ClientResult<UserProfile> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
            || self.failing_token.as_deref() == Some(credential.token());
        if failing {
            return Err(ClientError::api_error(
                self.failure_status,
                "FAKE",
                "fake failure",
            ));
        }

        Ok(UserProfile {
            id: UserId::new(credential.token()),
            organization_id: self.organization_id.clone(),
            permissions: Permissions::new(),
            attributes: UserAttributes::default(),
        })
    }
}

/// Organization source backed by in-memory tables
#[derive(Default)]
pub(crate) struct FakeOrganizations {
    by_id: HashMap<String, Organization>,
    by_tenant: HashMap<String, Organization>,
    lookup_status: Option<u16>,
    content_status: Option<u16>,
    lookup_calls: AtomicUsize,
    lookup_tokens: Mutex<Vec<Option<String>>>,
}

impl FakeOrganizations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_organization(mut self, organization: Organization) -> Self {
        if let Some(tenant) = organization.tenant_key() {
            self.by_tenant
                .insert(tenant.as_str().to_string(), organization.clone());
        }
        self.by_id
            .insert(organization.id.as_str().to_string(), organization);
        self
    }

    pub(crate) fn with_content(mut self, tenant: &str, organization: Organization) -> Self {
        self.by_tenant.insert(tenant.to_string(), organization);
        self
    }

    pub(crate) fn failing_lookup(mut self, status: u16) -> Self {
        self.lookup_status = Some(status);
        self
    }

    pub(crate) fn failing_content(mut self, status: u16) -> Self {
        self.content_status = Some(status);
        self
    }

    pub(crate) fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn lookup_tokens(&self) -> Vec<Option<String>> {
        self.lookup_tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrganizationSource for FakeOrganizations {
    async fn fetch_organization(
        &self,
        id: &OrganizationId,
        credential: Option<&Credential>,
    ) -> ClientResult<Organization> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup_tokens
            .lock()
            .unwrap()
            .push(credential.map(|c| c.token().to_string()));

        if let Some(status) = self.lookup_status {
            return Err(ClientError::api_error(status, "FAKE", "lookup failed"));
        }
        self.by_id
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| ClientError::api_error(404, "NOT_FOUND", "no such organization"))
    }

    async fn fetch_tenant_content(
        &self,
        tenant: &TenantKey,
        _credential: Option<&Credential>,
    ) -> ClientResult<Option<Organization>> {
        if let Some(status) = self.content_status {
            return Err(ClientError::api_error(status, "FAKE", "content failed"));
        }
        Ok(self.by_tenant.get(tenant.as_str()).cloned())
    }
}
