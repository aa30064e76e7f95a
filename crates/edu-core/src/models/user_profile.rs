use crate::{OrganizationId, Permission, Permissions, Role, UserId};

use serde::{Deserialize, Serialize};

/// Descriptive user fields; everything optional because the backend omits
/// what the user never filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAttributes {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

/// The signed-in user as seen by this client. Never mutated locally; a
/// change means a fresh fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub organization_id: Option<OrganizationId>,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(default)]
    pub attributes: UserAttributes,
}

impl UserProfile {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(permission)
    }

    pub fn role(&self) -> Option<Role> {
        self.attributes.role
    }
}
