// ── Admin dashboard ──
//
// Back-office state: both catalog lists plus the image editor used by the
// vehicle form. Mutations are optimistic-on-confirmation: the store call
// runs first, and only a confirmed success patches the local copy -- no
// re-fetch afterwards.

use std::path::Path;

use tokio::join;
use tracing::warn;

use crate::catalog::CatalogStore;
use crate::encode::encode_file_as_inline_data;
use crate::error::CoreError;
use crate::model::{Lead, MAX_IMAGES, NewVehicle, Vehicle, VehiclePatch};

/// State of the admin back-office.
#[derive(Debug, Default)]
pub struct AdminDashboard {
    vehicles: Vec<Vehicle>,
    leads: Vec<Lead>,
    loaded: bool,
}

impl AdminDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetch both lists in parallel. Either list failing degrades to
    /// empty (the store is fail-soft on reads).
    pub async fn load(&mut self, store: &CatalogStore) {
        let (vehicles, leads) = join!(store.list_vehicles(), store.list_leads());
        self.vehicles = vehicles;
        self.leads = leads;
        self.loaded = true;
    }

    // ── Vehicle mutations ────────────────────────────────────────────

    /// Create a listing. On success the created row is prepended to the
    /// local list (newest-first order is preserved without a re-fetch).
    pub async fn create_vehicle(&mut self, store: &CatalogStore, input: &NewVehicle) -> bool {
        match store.create_vehicle(input).await {
            Some(vehicle) => {
                self.vehicles.insert(0, vehicle);
                true
            }
            None => false,
        }
    }

    /// Update a listing. On success the patch is applied to the local
    /// copy in place.
    pub async fn update_vehicle(
        &mut self,
        store: &CatalogStore,
        id: &str,
        patch: &VehiclePatch,
    ) -> bool {
        if !store.update_vehicle(id, patch).await {
            return false;
        }
        if let Some(vehicle) = self.vehicles.iter_mut().find(|v| v.id == id) {
            patch.apply_to(vehicle);
        }
        true
    }

    /// Delete a listing. On success it is removed from the local list.
    pub async fn delete_vehicle(&mut self, store: &CatalogStore, id: &str) -> bool {
        if !store.delete_vehicle(id).await {
            return false;
        }
        self.vehicles.retain(|v| v.id != id);
        true
    }

    // ── Lead mutations ───────────────────────────────────────────────

    /// Delete a lead. On failure the local list is untouched and the
    /// caller surfaces the failure to the operator.
    pub async fn delete_lead(&mut self, store: &CatalogStore, id: &str) -> bool {
        if !store.delete_lead(id).await {
            return false;
        }
        self.leads.retain(|l| l.id != id);
        true
    }
}

// ── Image list editing ───────────────────────────────────────────────

/// Result of adding a batch of image files: how many got in, how many
/// were rejected by the per-listing cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageAddOutcome {
    pub added: usize,
    pub rejected: usize,
}

/// Ordered image list for the vehicle form, capped at [`MAX_IMAGES`].
#[derive(Debug, Default)]
pub struct ImageListEditor {
    urls: Vec<String>,
}

impl ImageListEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the editor from an existing listing. Lists over the cap
    /// (possible in legacy rows) are truncated.
    pub fn from_existing(mut urls: Vec<String>) -> Self {
        if urls.len() > MAX_IMAGES {
            warn!(count = urls.len(), "image list over cap, truncating");
            urls.truncate(MAX_IMAGES);
        }
        Self { urls }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn is_full(&self) -> bool {
        self.urls.len() >= MAX_IMAGES
    }

    /// Slots still available.
    pub fn remaining(&self) -> usize {
        MAX_IMAGES - self.urls.len().min(MAX_IMAGES)
    }

    /// Encode and append a batch of files, in order, up to the cap.
    /// Files past the cap are counted as rejected, not an error. A read
    /// or encode failure fails the whole batch and leaves the list as it
    /// was before the call.
    pub async fn add_files(&mut self, paths: &[impl AsRef<Path>]) -> Result<ImageAddOutcome, CoreError> {
        let take = paths.len().min(self.remaining());
        let rejected = paths.len() - take;
        if rejected > 0 {
            warn!(rejected, cap = MAX_IMAGES, "image cap reached, rejecting extra files");
        }

        let mut encoded = Vec::with_capacity(take);
        for path in &paths[..take] {
            encoded.push(encode_file_as_inline_data(path.as_ref()).await?);
        }
        self.urls.extend(encoded);

        Ok(ImageAddOutcome {
            added: take,
            rejected,
        })
    }

    /// Append a non-empty external URL. Returns `false` when the URL is
    /// blank or the list is full.
    pub fn add_url(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if url.trim().is_empty() || self.is_full() {
            return false;
        }
        self.urls.push(url);
        true
    }

    /// Remove the image at `index`, returning it. Out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.urls.len() {
            Some(self.urls.remove(index))
        } else {
            None
        }
    }

    /// Consume the editor, yielding the final ordered list.
    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}
