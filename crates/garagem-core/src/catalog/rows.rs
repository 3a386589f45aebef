// ── Persisted row schema and translation ──
//
// Wire-side row types for the `vehicles` and `leads` tables, plus the
// image-list codec. Leads live in a single wide table with nullable
// variant-specific columns, discriminated by `type`.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::model::{Category, Lead, LeadDetails, LeadDraft, LeadKind, NewVehicle, Vehicle, VehiclePatch};

// ── Image-list codec ─────────────────────────────────────────────────

/// Encode an ordered image list into the single `image_url` text column.
/// New rows are always written in the JSON form.
pub(crate) fn encode_image_list(urls: &[String]) -> String {
    serde_json::to_string(urls).unwrap_or_else(|_| "[]".into())
}

/// Decode the `image_url` column into an ordered list.
///
/// Two live branches: the JSON-array form written by current code, and a
/// legacy form where the column holds one bare URL (rows that predate
/// multi-image support). A value that is not valid JSON, or is valid JSON
/// but not an array, is wrapped as a single-element list. Empty or absent
/// yields an empty list.
pub(crate) fn decode_image_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        // Valid JSON but not an array, or not JSON at all: a legacy
        // single-URL row. Keep the raw value verbatim.
        Ok(_) | Err(_) => vec![raw.to_owned()],
    }
}

// ── Numeric tolerance ────────────────────────────────────────────────

/// The backend's `numeric` columns arrive as JSON numbers or as strings
/// depending on the column definition; accept both.
fn de_numeric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("numeric out of f64 range")),
        serde_json::Value::String(s) => s
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid numeric string: {e}"))),
        other => Err(serde::de::Error::custom(format!(
            "expected number or string, got {other}"
        ))),
    }
}

// ── Vehicle rows ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct VehicleRow {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub mileage: u32,
    #[serde(deserialize_with = "de_numeric")]
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
}

impl VehicleRow {
    pub(crate) fn into_vehicle(self) -> Vehicle {
        let category = Category::from_str(&self.category).unwrap_or_else(|_| {
            warn!(id = %self.id, category = %self.category, "unknown vehicle category, defaulting");
            Category::default()
        });
        Vehicle {
            image_urls: decode_image_list(self.image_url.as_deref()),
            id: self.id,
            brand: self.brand,
            model: self.model,
            year: self.year,
            mileage: self.mileage,
            price: self.price,
            category,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewVehicleRow<'a> {
    pub brand: &'a str,
    pub model: &'a str,
    pub year: &'a str,
    pub mileage: u32,
    pub price: f64,
    pub image_url: String,
    pub category: Category,
}

impl<'a> From<&'a NewVehicle> for NewVehicleRow<'a> {
    fn from(input: &'a NewVehicle) -> Self {
        Self {
            brand: &input.brand,
            model: &input.model,
            year: &input.year,
            mileage: input.mileage,
            price: input.price,
            image_url: encode_image_list(&input.image_urls),
            category: input.category,
        }
    }
}

/// Sparse patch row: only the set columns are serialized.
#[derive(Debug, Default, Serialize)]
pub(crate) struct VehiclePatchRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl<'a> From<&'a VehiclePatch> for VehiclePatchRow<'a> {
    fn from(patch: &'a VehiclePatch) -> Self {
        Self {
            brand: patch.brand.as_deref(),
            model: patch.model.as_deref(),
            year: patch.year.as_deref(),
            mileage: patch.mileage,
            price: patch.price,
            image_url: patch.image_urls.as_deref().map(encode_image_list),
            category: patch.category,
        }
    }
}

// ── Lead rows ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct LeadRow {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    #[serde(default)]
    pub vehicle_brand: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub vehicle_year: Option<String>,
    #[serde(default)]
    pub vehicle_mileage: Option<String>,
    #[serde(default)]
    pub expected_value: Option<String>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub vehicle_value: Option<String>,
    #[serde(default)]
    pub entry_value: Option<String>,
    #[serde(default)]
    pub installments: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
}

impl LeadRow {
    /// Reconstruct the tagged union from the flat row. Returns `None` for
    /// an unknown discriminant (the caller logs and skips the row).
    pub(crate) fn into_lead(self) -> Option<Lead> {
        let details = match self.kind.as_str() {
            "SELL" => LeadDetails::Sell {
                vehicle_brand: self.vehicle_brand.unwrap_or_default(),
                vehicle_model: self.vehicle_model.unwrap_or_default(),
                vehicle_year: self.vehicle_year.unwrap_or_default(),
                vehicle_mileage: self.vehicle_mileage.unwrap_or_default(),
                expected_value: self.expected_value.unwrap_or_default(),
                observations: self.observations.unwrap_or_default(),
            },
            "FINANCE" => LeadDetails::Finance {
                cpf: self.cpf.unwrap_or_default(),
                vehicle_value: self.vehicle_value.unwrap_or_default(),
                entry_value: self.entry_value.unwrap_or_default(),
                installments: self.installments.unwrap_or_default(),
            },
            "INTEREST" => LeadDetails::Interest {
                vehicle_id: self.vehicle_id.unwrap_or_default(),
                vehicle_brand: self.vehicle_brand.unwrap_or_default(),
                vehicle_model: self.vehicle_model.unwrap_or_default(),
            },
            _ => return None,
        };

        Some(Lead {
            id: self.id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            date: self.date,
            details,
        })
    }
}

/// Outgoing lead row. Only the columns belonging to the draft's variant
/// are ever serialized -- the other variants' columns stay absent.
#[derive(Debug, Serialize)]
pub(crate) struct NewLeadRow<'a> {
    #[serde(rename = "type")]
    pub kind: LeadKind,
    pub name: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_brand: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_year: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_mileage: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<&'a str>,
}

impl<'a> From<&'a LeadDraft> for NewLeadRow<'a> {
    fn from(draft: &'a LeadDraft) -> Self {
        let mut row = Self {
            kind: draft.details.kind(),
            name: &draft.name,
            phone: &draft.phone,
            email: &draft.email,
            vehicle_brand: None,
            vehicle_model: None,
            vehicle_year: None,
            vehicle_mileage: None,
            expected_value: None,
            observations: None,
            cpf: None,
            vehicle_value: None,
            entry_value: None,
            installments: None,
            vehicle_id: None,
        };

        match &draft.details {
            LeadDetails::Sell {
                vehicle_brand,
                vehicle_model,
                vehicle_year,
                vehicle_mileage,
                expected_value,
                observations,
            } => {
                row.vehicle_brand = Some(vehicle_brand);
                row.vehicle_model = Some(vehicle_model);
                row.vehicle_year = Some(vehicle_year);
                row.vehicle_mileage = Some(vehicle_mileage);
                row.expected_value = Some(expected_value);
                row.observations = Some(observations);
            }
            LeadDetails::Finance {
                cpf,
                vehicle_value,
                entry_value,
                installments,
            } => {
                row.cpf = Some(cpf);
                row.vehicle_value = Some(vehicle_value);
                row.entry_value = Some(entry_value);
                row.installments = Some(installments);
            }
            LeadDetails::Interest {
                vehicle_id,
                vehicle_brand,
                vehicle_model,
            } => {
                row.vehicle_id = Some(vehicle_id);
                row.vehicle_brand = Some(vehicle_brand);
                row.vehicle_model = Some(vehicle_model);
            }
        }

        row
    }
}
