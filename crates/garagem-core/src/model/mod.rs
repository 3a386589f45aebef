//! Canonical domain types: vehicles and the lead sum type.

pub mod lead;
pub mod vehicle;

pub use lead::{INSTALLMENT_OPTIONS, Lead, LeadDetails, LeadDraft, LeadKind};
pub use vehicle::{Category, MAX_IMAGES, NewVehicle, Vehicle, VehiclePatch};
