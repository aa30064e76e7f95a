pub mod identifiers;
pub mod organization;
pub mod permission;
pub mod role;
pub mod tenant_key;
pub mod user_profile;
