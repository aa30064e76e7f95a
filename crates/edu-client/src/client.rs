use crate::wire::{Document, ErrorBody, OrganizationResource, UserResource};
use crate::{ClientError, ClientResult};

use edu_auth::Credential;
use edu_core::{Clock, Organization, OrganizationId, SystemClock, TenantKey, UserProfile};

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::{Client as ReqwestClient, Method};
use serde::de::DeserializeOwned;

/// HTTP client for the identity and organization REST backend
#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    client: ReqwestClient,
    clock: Arc<dyn Clock>,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "https://api.school.example")
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            ..Self::new(base_url)
        })
    }

    /// Clock used to decide whether a credential may still be sent
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build a request, attaching the credential as a bearer token.
    ///
    /// An expired credential is never attached; the request is refused instead.
    #[track_caller]
    fn request(
        &self,
        method: Method,
        path: &str,
        credential: Option<&Credential>,
    ) -> ClientResult<reqwest::RequestBuilder> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(credential) = credential {
            if credential.is_expired(self.clock.now()) {
                return Err(ClientError::expired_credential());
            }
            req = req.bearer_auth(credential.token());
        }

        Ok(req)
    }

    /// Execute request and decode the body, mapping error statuses to
    /// `ClientError::Api`.
    async fn execute<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let (code, message) = serde_json::from_str::<ErrorBody>(&body)
                .unwrap_or_default()
                .into_code_and_message();
            debug!("Backend answered {status}: {code}");
            return Err(ClientError::api_error(status.as_u16(), code, message));
        }

        Ok(serde_json::from_str(&body)?)
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Fetch the signed-in user with their permissions
    pub async fn current_user(&self, credential: &Credential) -> ClientResult<UserProfile> {
        let req = self.request(Method::GET, "/users/me?include=permission", Some(credential))?;
        let document: Document<UserResource> = self.execute(req).await?;
        Ok(document.data.into())
    }

    // =========================================================================
    // Organizations
    // =========================================================================

    /// Fetch organization metadata by id
    pub async fn organization(
        &self,
        id: &OrganizationId,
        credential: Option<&Credential>,
    ) -> ClientResult<Organization> {
        let req = self.request(Method::GET, &format!("/organizations/{}", id), credential)?;
        let document: Document<OrganizationResource> = self.execute(req).await?;
        Ok(document.data.into())
    }

    /// Fetch the organization whose public content set a tenant key selects
    pub async fn organization_by_tenant(
        &self,
        tenant: &TenantKey,
        credential: Option<&Credential>,
    ) -> ClientResult<Option<Organization>> {
        let req = self.request(
            Method::GET,
            &format!("/organizations?filter%5Bsubdomain%5D={}", tenant),
            credential,
        )?;
        let document: Document<Vec<OrganizationResource>> = self.execute(req).await?;
        Ok(document.data.into_iter().next().map(Organization::from))
    }
}
