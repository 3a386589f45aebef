//! Domain and state layer between `garagem-api` and UI consumers.
//!
//! This crate owns the business logic and headless page state for the
//! dealership workspace:
//!
//! - **[`CatalogStore`]** — Data access over the `vehicles` and `leads`
//!   tables. Reads are fail-soft (log + empty list); mutations report
//!   success as `Option`/`bool` so callers can patch local state only on
//!   confirmation.
//!
//! - **[`SessionManager`]** — Sign-in/sign-out lifecycle publishing an
//!   [`AuthState`] over a `tokio::sync::watch` channel, keeping the REST
//!   client's bearer token in step with the current session.
//!
//! - **Page controllers** ([`pages`]) — Headless state machines for the
//!   public inventory listing, the admin dashboard, and the lead capture
//!   forms. Rendering is the embedder's concern.
//!
//! - **Domain model** ([`model`]) — `Vehicle` and the `Lead` sum type
//!   with its three capture variants.

pub mod catalog;
pub mod encode;
pub mod error;
pub mod model;
pub mod pages;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::CatalogStore;
pub use encode::encode_file_as_inline_data;
pub use error::CoreError;
pub use model::{
    Category, INSTALLMENT_OPTIONS, Lead, LeadDetails, LeadDraft, LeadKind, MAX_IMAGES, NewVehicle,
    Vehicle, VehiclePatch,
};
pub use session::{AuthState, SessionManager};
