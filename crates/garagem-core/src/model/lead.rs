// ── Lead domain types ──
//
// A lead is a tagged union over three capture flows: sell-your-vehicle,
// financing simulation, and interest in a specific listing. The variant is
// fixed at creation and never changes; leads are immutable except deletion.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::vehicle::Vehicle;
use crate::error::CoreError;

/// Financing installment counts offered by the simulation form.
/// Persisted as text; membership is enforced at draft construction.
pub const INSTALLMENT_OPTIONS: [&str; 5] = ["12", "24", "36", "48", "60"];

/// The wire discriminant for a lead variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadKind {
    Sell,
    Finance,
    Interest,
}

/// Variant-specific lead payload. Every consumer matches exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeadDetails {
    /// "Sell your vehicle" — the visitor describes the vehicle they offer.
    Sell {
        vehicle_brand: String,
        vehicle_model: String,
        vehicle_year: String,
        vehicle_mileage: String,
        expected_value: String,
        /// Free text; empty when the visitor left it blank.
        observations: String,
    },
    /// Financing simulation request.
    Finance {
        cpf: String,
        vehicle_value: String,
        entry_value: String,
        /// One of [`INSTALLMENT_OPTIONS`], kept as text.
        installments: String,
    },
    /// Interest in a listed vehicle. Brand/model are a denormalized
    /// snapshot taken at submission time — they survive later edits or
    /// deletion of the vehicle itself.
    Interest {
        vehicle_id: String,
        vehicle_brand: String,
        vehicle_model: String,
    },
}

impl LeadDetails {
    pub fn kind(&self) -> LeadKind {
        match self {
            Self::Sell { .. } => LeadKind::Sell,
            Self::Finance { .. } => LeadKind::Finance,
            Self::Interest { .. } => LeadKind::Interest,
        }
    }
}

/// A captured lead as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Opaque server-assigned identifier.
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Server-assigned creation timestamp; listings sort on it descending.
    pub date: String,
    pub details: LeadDetails,
}

/// Create-input for a lead: everything the server assigns is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub details: LeadDetails,
}

impl LeadDraft {
    /// Build an interest draft, snapshotting the selected vehicle's
    /// id/brand/model at submission time.
    pub fn interest(vehicle: &Vehicle, name: String, phone: String, email: String) -> Self {
        Self {
            name,
            phone,
            email,
            details: LeadDetails::Interest {
                vehicle_id: vehicle.id.clone(),
                vehicle_brand: vehicle.brand.clone(),
                vehicle_model: vehicle.model.clone(),
            },
        }
    }

    /// Build a financing draft, validating the installment count against
    /// the offered option set.
    pub fn finance(
        name: String,
        phone: String,
        email: String,
        cpf: String,
        vehicle_value: String,
        entry_value: String,
        installments: String,
    ) -> Result<Self, CoreError> {
        if !INSTALLMENT_OPTIONS.contains(&installments.as_str()) {
            return Err(CoreError::ValidationFailed {
                message: format!(
                    "installments must be one of {INSTALLMENT_OPTIONS:?}, got '{installments}'"
                ),
            });
        }
        Ok(Self {
            name,
            phone,
            email,
            details: LeadDetails::Finance {
                cpf,
                vehicle_value,
                entry_value,
                installments,
            },
        })
    }
}
