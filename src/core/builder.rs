//! Map builder for fluent API configuration
//!
//! [`PoiMapBuilder`] starts from a [`ViewerProfile`] and lets individual view
//! settings, the tooltip overlay and an initial POI list be overridden before
//! the map is assembled.

use crate::{
    core::{
        config::{ViewerConfig, ViewerProfile},
        geo::{LatLng, Point},
        map::PoiMap,
    },
    data::poi::{CategoryFilter, PointOfInterest},
    input::hover::HoverConfig,
    spatial::clustering::ClusteringConfig,
    ui::tooltip::TooltipOverlay,
    Result,
};

/// Builder for creating and configuring [`PoiMap`] instances
pub struct PoiMapBuilder {
    config: ViewerConfig,
    tooltip: Option<TooltipOverlay>,
    pois: Option<Vec<PointOfInterest>>,
    category: CategoryFilter,
}

impl PoiMapBuilder {
    /// Standard profile, Vienna view, default tooltip
    pub fn new() -> Self {
        Self {
            config: ViewerProfile::Standard.resolve(),
            tooltip: Some(TooltipOverlay::new()),
            pois: None,
            category: CategoryFilter::All,
        }
    }

    /// Replaces the whole configuration with a preset
    pub fn with_profile(mut self, profile: ViewerProfile) -> Self {
        self.config = profile.resolve();
        self
    }

    pub fn with_config(mut self, config: ViewerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_center(mut self, center: LatLng) -> Self {
        self.config.view.center = center;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.config.view.zoom = zoom;
        self
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(self, center: LatLng, zoom: f64) -> Self {
        self.with_center(center).with_zoom(zoom)
    }

    /// Container size in pixels
    pub fn with_size(mut self, size: Point) -> Self {
        self.config.view.size = size;
        self
    }

    /// Set zoom limits
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.config.view.min_zoom = min_zoom;
        self.config.view.max_zoom = max_zoom;
        self
    }

    pub fn with_clustering(mut self, clustering: ClusteringConfig) -> Self {
        self.config.clustering = clustering;
        self
    }

    pub fn with_hover(mut self, hover: HoverConfig) -> Self {
        self.config.hover = hover;
        self
    }

    /// Overlay used for hover tooltips; `None` leaves hover disabled
    pub fn with_tooltip(mut self, tooltip: Option<TooltipOverlay>) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// POIs to show right away instead of waiting for a loader
    pub fn with_pois(mut self, pois: Vec<PointOfInterest>) -> Self {
        self.pois = Some(pois);
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    /// Build the map with the configured options
    pub fn build(self) -> Result<PoiMap> {
        // Rejects what PoiMap::new would otherwise sanitise
        self.config.validate()?;

        let mut map = PoiMap::new(self.config);
        map.attach_tooltip(self.tooltip);
        map.update_markers(self.category);
        if let Some(pois) = self.pois {
            map.set_poi_list(pois);
        }

        log::debug!(
            "poi map built at {:?}, zoom {}",
            map.viewport().center,
            map.viewport().zoom
        );
        Ok(map)
    }
}

impl Default for PoiMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
