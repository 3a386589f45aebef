// ── Vehicle domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Maximum number of images a vehicle listing may carry.
pub const MAX_IMAGES: usize = 5;

/// Catalog category. Persisted as its display name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize, Default,
)]
pub enum Category {
    #[default]
    Nacional,
    Importado,
}

/// A vehicle listing as the application sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Opaque server-assigned identifier. Immutable.
    pub id: String,
    pub brand: String,
    pub model: String,
    /// Free text -- listings use ranges like "2019/2020".
    pub year: String,
    /// Kilometers.
    pub mileage: u32,
    pub price: f64,
    /// Ordered, 0..=5 entries; data-URIs or external URLs.
    pub image_urls: Vec<String>,
    pub category: Category,
}

/// A vehicle about to be created -- everything but the server-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub mileage: u32,
    pub price: f64,
    pub image_urls: Vec<String>,
    pub category: Category,
}

/// Sparse patch for an existing vehicle. Unset fields are omitted from
/// the outgoing request and left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehiclePatch {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub mileage: Option<u32>,
    pub price: Option<f64>,
    pub image_urls: Option<Vec<String>>,
    pub category: Option<Category>,
}

impl VehiclePatch {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the set fields to a vehicle in place. Used by the admin
    /// dashboard to patch its local copy after a confirmed update.
    pub fn apply_to(&self, vehicle: &mut Vehicle) {
        if let Some(ref brand) = self.brand {
            vehicle.brand = brand.clone();
        }
        if let Some(ref model) = self.model {
            vehicle.model = model.clone();
        }
        if let Some(ref year) = self.year {
            vehicle.year = year.clone();
        }
        if let Some(mileage) = self.mileage {
            vehicle.mileage = mileage;
        }
        if let Some(price) = self.price {
            vehicle.price = price;
        }
        if let Some(ref urls) = self.image_urls {
            vehicle.image_urls = urls.clone();
        }
        if let Some(category) = self.category {
            vehicle.category = category;
        }
    }
}
