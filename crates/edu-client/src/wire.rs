//! JSON:API shapes returned by the backend, and their mapping onto the
//! domain types.

use edu_core::{Organization, OrganizationId, Permissions, UserAttributes, UserId, UserProfile};

use serde::Deserialize;

/// Top-level `{ "data": ... }` document
#[derive(Debug, Deserialize)]
pub(crate) struct Document<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserResource {
    id: UserId,
    #[serde(default)]
    attributes: UserResourceAttributes,
    #[serde(default)]
    user_permissions: Permissions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserResourceAttributes {
    organization_id: Option<OrganizationId>,
    #[serde(flatten)]
    profile: UserAttributes,
}

impl From<UserResource> for UserProfile {
    fn from(resource: UserResource) -> Self {
        UserProfile {
            id: resource.id,
            organization_id: resource.attributes.organization_id,
            permissions: resource.user_permissions,
            attributes: resource.attributes.profile,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationResource {
    id: OrganizationId,
    #[serde(default)]
    attributes: OrganizationAttributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OrganizationAttributes {
    name: Option<String>,
    subdomain: Option<String>,
    template: Option<String>,
}

impl From<OrganizationResource> for Organization {
    fn from(resource: OrganizationResource) -> Self {
        Organization {
            id: resource.id,
            name: resource.attributes.name,
            subdomain: resource.attributes.subdomain,
            template: resource.attributes.template,
        }
    }
}

/// Error bodies come in two dialects: `{ "error": { code, message } }` and
/// JSON:API `{ "errors": [ { code, title, detail } ] }`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    error: Option<ErrorDetail>,
    errors: Vec<JsonApiError>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonApiError {
    code: Option<String>,
    title: Option<String>,
    detail: Option<String>,
}

impl ErrorBody {
    /// (code, message), falling back to UNKNOWN / "Unknown error"
    pub fn into_code_and_message(self) -> (String, String) {
        let (code, message) = if let Some(error) = self.error {
            (error.code, error.message)
        } else if let Some(error) = self.errors.into_iter().next() {
            (error.code, error.detail.or(error.title))
        } else {
            (None, None)
        };

        (
            code.unwrap_or_else(|| String::from("UNKNOWN")),
            message.unwrap_or_else(|| String::from("Unknown error")),
        )
    }
}
