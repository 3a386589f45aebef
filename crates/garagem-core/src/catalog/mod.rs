//! Catalog data access: vehicles and leads.
//!
//! Read paths are fail-soft: a fetch that errors logs and yields an empty
//! list rather than surfacing the failure, so a flaky backend degrades the
//! catalog to "no listings" instead of breaking the page. Mutations report
//! success as `Option`/`bool`; callers keep their local state untouched on
//! failure.

mod rows;

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::model::{Lead, LeadDraft, NewVehicle, Vehicle, VehiclePatch};
use garagem_api::{Direction, RestClient};

use rows::{LeadRow, NewLeadRow, NewVehicleRow, VehiclePatchRow, VehicleRow};

const VEHICLES_TABLE: &str = "vehicles";
const LEADS_TABLE: &str = "leads";

/// Data access layer over the two catalog tables.
#[derive(Clone)]
pub struct CatalogStore {
    rest: Arc<RestClient>,
}

impl CatalogStore {
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    // ── Vehicles ─────────────────────────────────────────────────────

    /// All vehicles, newest first. Returns an empty list on any failure.
    pub async fn list_vehicles(&self) -> Vec<Vehicle> {
        match self
            .rest
            .select::<VehicleRow>(VEHICLES_TABLE, "created_at", Direction::Descending)
            .await
        {
            Ok(rows) => {
                debug!(count = rows.len(), "fetched vehicle listings");
                rows.into_iter().map(VehicleRow::into_vehicle).collect()
            }
            Err(e) => {
                error!(error = %e, "vehicle listing fetch failed");
                Vec::new()
            }
        }
    }

    /// Create a vehicle listing. Returns the created row with its
    /// server-assigned id, or `None` on failure.
    pub async fn create_vehicle(&self, input: &NewVehicle) -> Option<Vehicle> {
        match self
            .rest
            .insert::<VehicleRow>(VEHICLES_TABLE, &NewVehicleRow::from(input))
            .await
        {
            Ok(row) => Some(row.into_vehicle()),
            Err(e) => {
                error!(error = %e, brand = %input.brand, model = %input.model, "vehicle create failed");
                None
            }
        }
    }

    /// Patch a vehicle by id. Only the set fields are sent.
    pub async fn update_vehicle(&self, id: &str, patch: &VehiclePatch) -> bool {
        if patch.is_empty() {
            warn!(id, "empty vehicle patch, nothing to update");
            return false;
        }
        match self
            .rest
            .update(VEHICLES_TABLE, id, &VehiclePatchRow::from(patch))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, id, "vehicle update failed");
                false
            }
        }
    }

    /// Hard-delete a vehicle by id.
    pub async fn delete_vehicle(&self, id: &str) -> bool {
        match self.rest.delete(VEHICLES_TABLE, id).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, id, "vehicle delete failed");
                false
            }
        }
    }

    // ── Leads ────────────────────────────────────────────────────────

    /// All leads, newest first. Rows whose discriminant the client does
    /// not know are skipped with a warning; a fetch failure yields an
    /// empty list.
    pub async fn list_leads(&self) -> Vec<Lead> {
        let rows = match self
            .rest
            .select::<LeadRow>(LEADS_TABLE, "date", Direction::Descending)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "lead listing fetch failed");
                return Vec::new();
            }
        };

        rows.into_iter()
            .filter_map(|row| {
                let id = row.id.clone();
                let kind = row.kind.clone();
                let lead = row.into_lead();
                if lead.is_none() {
                    warn!(id, kind, "skipping lead with unknown type");
                }
                lead
            })
            .collect()
    }

    /// Persist a captured lead. Only the draft variant's columns are sent.
    pub async fn create_lead(&self, draft: &LeadDraft) -> Option<Lead> {
        match self
            .rest
            .insert::<LeadRow>(LEADS_TABLE, &NewLeadRow::from(draft))
            .await
        {
            Ok(row) => {
                let id = row.id.clone();
                let lead = row.into_lead();
                if lead.is_none() {
                    // The server echoed a type we cannot decode; treat as failure.
                    error!(id, "created lead came back with unknown type");
                }
                lead
            }
            Err(e) => {
                error!(error = %e, kind = %draft.details.kind(), "lead create failed");
                None
            }
        }
    }

    /// Hard-delete a lead by id.
    pub async fn delete_lead(&self, id: &str) -> bool {
        match self.rest.delete(LEADS_TABLE, id).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, id, "lead delete failed");
                false
            }
        }
    }
}
