//! Async client for the hosted dealership backend.
//!
//! Two API surfaces share one transport layer:
//!
//! - **[`RestClient`]** — the REST table API (`/rest/v1/{table}`):
//!   generic `select`/`insert`/`update`/`delete` over serde types, with
//!   ordering and id-equality filters. Authenticates with the project
//!   `apikey` plus a bearer token (session token when installed, anon
//!   key otherwise).
//! - **[`AuthClient`]** — the auth API (`/auth/v1/*`): password-grant
//!   sign-in, sign-out, and session introspection.
//!
//! Row mapping and session lifecycle live upstream in `garagem-core`.

pub mod auth;
pub mod error;
pub mod rest;
pub mod transport;

pub use auth::{AuthClient, AuthUser, Session};
pub use error::Error;
pub use rest::{Direction, RestClient};
pub use transport::TransportConfig;
