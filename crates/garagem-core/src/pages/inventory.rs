// ── Public inventory page ──
//
// Holds the fetched vehicle list plus the visitor's filter and search
// input, and recomputes the visible subset on every change. Loads carry a
// generation token so a stale response can never clobber a newer one.

use tracing::debug;

use crate::catalog::CatalogStore;
use crate::model::{Category, Vehicle};

/// Whether the page is still waiting for its first (or a forced) load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagePhase {
    #[default]
    Loading,
    Ready,
}

/// Category filter: everything, or one category only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// Compute the visible subset: category filter first, then a
/// case-insensitive substring match of the search text against brand and
/// model. The two narrowings commute; the input order is preserved.
pub fn filter_vehicles(
    vehicles: &[Vehicle],
    filter: CategoryFilter,
    search: &str,
) -> Vec<Vehicle> {
    let needle = search.trim().to_lowercase();
    vehicles
        .iter()
        .filter(|v| match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => v.category == c,
        })
        .filter(|v| {
            needle.is_empty()
                || v.brand.to_lowercase().contains(&needle)
                || v.model.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// State of the public listing page.
#[derive(Debug, Default)]
pub struct InventoryPage {
    phase: PagePhase,
    vehicles: Vec<Vehicle>,
    filter: CategoryFilter,
    search: String,
    visible: Vec<Vehicle>,
    /// Load generation. Bumped by `begin_load`; a completion whose token
    /// no longer matches is discarded.
    generation: u64,
}

impl InventoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PagePhase {
        self.phase
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// The vehicles currently visible under the active filter and search.
    pub fn visible(&self) -> &[Vehicle] {
        &self.visible
    }

    /// True when the page is ready and the visible set is empty (the UI
    /// shows an empty-state message, not a spinner).
    pub fn is_empty(&self) -> bool {
        self.phase == PagePhase::Ready && self.visible.is_empty()
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Start a load. Returns the generation token the eventual
    /// `apply_loaded` call must present.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.phase = PagePhase::Loading;
        self.generation
    }

    /// Complete a load. Returns `false` (and changes nothing) when the
    /// token is stale, i.e. a newer load started in the meantime.
    pub fn apply_loaded(&mut self, token: u64, vehicles: Vec<Vehicle>) -> bool {
        if token != self.generation {
            debug!(token, current = self.generation, "discarding stale inventory load");
            return false;
        }
        self.vehicles = vehicles;
        self.phase = PagePhase::Ready;
        self.recompute();
        true
    }

    /// Fetch and apply in one step.
    pub async fn refresh(&mut self, store: &CatalogStore) {
        let token = self.begin_load();
        let vehicles = store.list_vehicles().await;
        self.apply_loaded(token, vehicles);
    }

    // ── Filtering ────────────────────────────────────────────────────

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.recompute();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible = filter_vehicles(&self.vehicles, self.filter, &self.search);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: &str, brand: &str, model: &str, category: Category) -> Vehicle {
        Vehicle {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            year: "2022".into(),
            mileage: 10_000,
            price: 100_000.0,
            image_urls: vec![],
            category,
        }
    }

    fn fleet() -> Vec<Vehicle> {
        vec![
            vehicle("1", "Fiat", "Toro", Category::Nacional),
            vehicle("2", "BMW", "M3", Category::Importado),
            vehicle("3", "Fiat", "Argo", Category::Nacional),
            vehicle("4", "Toyota", "Corolla", Category::Importado),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_brand_and_model() {
        let visible = filter_vehicles(&fleet(), CategoryFilter::All, "fIaT");
        assert_eq!(visible.len(), 2);
        let visible = filter_vehicles(&fleet(), CategoryFilter::All, "corolla");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "4");
    }

    #[test]
    fn filter_and_search_commute() {
        let a = filter_vehicles(
            &filter_vehicles(&fleet(), CategoryFilter::Only(Category::Nacional), ""),
            CategoryFilter::All,
            "fiat",
        );
        let b = filter_vehicles(
            &filter_vehicles(&fleet(), CategoryFilter::All, "fiat"),
            CategoryFilter::Only(Category::Nacional),
            "",
        );
        assert_eq!(a, b);
    }

    #[test]
    fn filtering_preserves_input_order() {
        let visible = filter_vehicles(&fleet(), CategoryFilter::Only(Category::Nacional), "");
        let ids: Vec<&str> = visible.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut page = InventoryPage::new();
        let first = page.begin_load();
        let second = page.begin_load();

        // The older response arrives late and must not apply.
        assert!(!page.apply_loaded(first, vec![vehicle("9", "Old", "Old", Category::Nacional)]));
        assert_eq!(page.phase(), PagePhase::Loading);

        assert!(page.apply_loaded(second, fleet()));
        assert_eq!(page.phase(), PagePhase::Ready);
        assert_eq!(page.visible().len(), 4);
    }

    #[test]
    fn empty_ready_page_reports_empty_not_loading() {
        let mut page = InventoryPage::new();
        assert!(!page.is_empty());

        let token = page.begin_load();
        page.apply_loaded(token, vec![]);
        assert!(page.is_empty());
        assert_eq!(page.phase(), PagePhase::Ready);
    }

    #[test]
    fn changing_filter_recomputes_visible_set() {
        let mut page = InventoryPage::new();
        let token = page.begin_load();
        page.apply_loaded(token, fleet());

        page.set_filter(CategoryFilter::Only(Category::Importado));
        assert_eq!(page.visible().len(), 2);

        page.set_search("m3");
        assert_eq!(page.visible().len(), 1);
        assert_eq!(page.visible()[0].brand, "BMW");

        page.set_filter(CategoryFilter::All);
        assert_eq!(page.visible().len(), 1);
    }
}
