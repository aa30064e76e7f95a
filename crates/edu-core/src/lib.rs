pub mod clock;
pub mod error;
pub mod models;


pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result};
pub use models::identifiers::{OrganizationId, UserId};
pub use models::organization::Organization;
pub use models::permission::{Permission, Permissions};
pub use models::role::Role;
pub use models::tenant_key::TenantKey;
pub use models::user_profile::{UserAttributes, UserProfile};
