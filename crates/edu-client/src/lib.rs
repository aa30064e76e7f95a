//! HTTP client for the school platform's REST backend
//!
//! Covers the two collaborators the session core talks to: the identity
//! backend (`/users/me`) and the organization backend (`/organizations`).

pub(crate) mod client;
pub(crate) mod error;
pub(crate) mod wire;


pub use client::Client;
pub use error::{ClientError, Result as ClientResult};
