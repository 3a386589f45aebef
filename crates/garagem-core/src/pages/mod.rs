//! Headless page controllers.
//!
//! Each controller owns the state one surface of the site needs and the
//! transitions the UI may trigger. Rendering is the embedder's concern;
//! the controllers expose plain state and methods so any frontend (or a
//! test) can drive them.

pub mod dashboard;
pub mod inventory;
pub mod lead_form;

pub use dashboard::{AdminDashboard, ImageAddOutcome, ImageListEditor};
pub use inventory::{CategoryFilter, InventoryPage, PagePhase, filter_vehicles};
pub use lead_form::{FormPhase, LeadCaptureForm, SUCCESS_DISMISS};
