use crate::{CoreError, Result as CoreErrorResult};

use std::collections::BTreeSet;
use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Permission tags the school dashboards understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    ManageOrganization,
    ManageUsers,
    ManageClasses,
    ManageTasks,
    ViewNotes,
    UploadFiles,
    UseChat,
}

impl Permission {
    pub const ALL: [Permission; 7] = [
        Self::ManageOrganization,
        Self::ManageUsers,
        Self::ManageClasses,
        Self::ManageTasks,
        Self::ViewNotes,
        Self::UploadFiles,
        Self::UseChat,
    ];

    /// Key used by the identity backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManageOrganization => "manage_organization",
            Self::ManageUsers => "manage_users",
            Self::ManageClasses => "manage_classes",
            Self::ManageTasks => "manage_tasks",
            Self::ViewNotes => "view_notes",
            Self::UploadFiles => "upload_files",
            Self::UseChat => "use_chat",
        }
    }
}

impl FromStr for Permission {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| CoreError::UnknownPermission {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Granted permissions of a user.
///
/// Known tags are kept as [`Permission`] values; granted keys this client
/// does not recognize are kept verbatim in a separate bucket so they survive
/// a round trip without widening the known vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions {
    granted: BTreeSet<Permission>,
    unrecognized: BTreeSet<String>,
}

impl Permissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the backend's `user_permissions` object.
    ///
    /// A key counts as granted when its value is `true` or carries metadata
    /// (anything other than `null` and `false`).
    pub fn from_json_map(map: &Map<String, Value>) -> Self {
        let mut permissions = Self::new();
        for (key, value) in map {
            if !is_granted(value) {
                continue;
            }
            match Permission::from_str(key) {
                Ok(permission) => {
                    permissions.granted.insert(permission);
                }
                Err(_) => {
                    permissions.unrecognized.insert(key.clone());
                }
            }
        }
        permissions
    }

    pub fn grant(&mut self, permission: Permission) {
        self.granted.insert(permission);
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }

    /// Lookup by backend key, covering unrecognized grants too.
    pub fn contains_key(&self, key: &str) -> bool {
        match Permission::from_str(key) {
            Ok(permission) => self.contains(permission),
            Err(_) => self.unrecognized.contains(key),
        }
    }

    pub fn granted(&self) -> impl Iterator<Item = Permission> + '_ {
        self.granted.iter().copied()
    }

    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.unrecognized.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty() && self.unrecognized.is_empty()
    }
}

fn is_granted(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

impl FromIterator<Permission> for Permissions {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().collect(),
            unrecognized: BTreeSet::new(),
        }
    }
}

impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map =
            serializer.serialize_map(Some(self.granted.len() + self.unrecognized.len()))?;
        for permission in &self.granted {
            map.serialize_entry(permission.as_str(), &true)?;
        }
        for key in &self.unrecognized {
            map.serialize_entry(key, &true)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Option::<Map<String, Value>>::deserialize(deserializer)?;
        Ok(map.as_ref().map(Self::from_json_map).unwrap_or_default())
    }
}
