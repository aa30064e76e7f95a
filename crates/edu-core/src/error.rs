use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid tenant key '{value}': {message} {location}")]
    InvalidTenantKey {
        value: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid {kind} identifier: {message} {location}")]
    InvalidIdentifier {
        kind: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown permission: {value} {location}")]
    UnknownPermission {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
