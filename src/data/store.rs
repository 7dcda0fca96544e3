use crate::data::poi::{CategoryFilter, PointOfInterest};

/// Owns the loaded POIs and the active category filter.
///
/// The filtered list is derived on every read. Callers that cache anything
/// built from it compare [`PoiStore::revision`] to know when to rebuild.
#[derive(Debug, Clone, Default)]
pub struct PoiStore {
    poi_list: Vec<PointOfInterest>,
    selected_category: CategoryFilter,
    revision: u64,
}

impl PoiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pois(poi_list: Vec<PointOfInterest>) -> Self {
        let mut store = Self::new();
        store.set_poi_list(poi_list);
        store
    }

    /// Replaces the full POI list
    pub fn set_poi_list(&mut self, poi_list: Vec<PointOfInterest>) {
        log::debug!("poi store: {} POIs loaded", poi_list.len());
        self.poi_list = poi_list;
        self.revision += 1;
    }

    /// Replaces the active filter, returning whether it changed
    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) -> bool {
        let category = category.into();
        if category == self.selected_category {
            return false;
        }
        log::debug!(
            "poi store: category {} -> {}",
            self.selected_category,
            category
        );
        self.selected_category = category;
        self.revision += 1;
        true
    }

    pub fn selected_category(&self) -> &CategoryFilter {
        &self.selected_category
    }

    /// Every loaded POI, in source order
    pub fn poi_list(&self) -> &[PointOfInterest] {
        &self.poi_list
    }

    /// POIs matching the active filter, in source order
    pub fn filtered_list(&self) -> Vec<&PointOfInterest> {
        self.poi_list
            .iter()
            .filter(|poi| self.selected_category.matches(&poi.category))
            .collect()
    }

    /// Bumped whenever the POI list or the filter changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.poi_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poi_list.is_empty()
    }
}
