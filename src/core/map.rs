use crate::{
    core::{
        bounds::Bounds,
        config::ViewerConfig,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    data::{
        poi::{CategoryFilter, PointOfInterest},
        source::PoiLoader,
        store::PoiStore,
    },
    input::{
        events::{EventHandled, InputEvent},
        hover::{HoverResolver, HoverState},
    },
    layers::vector::FeatureCollection,
    prelude::Arc,
    spatial::clustering::{Clustering, DisplayFeature},
    ui::{
        style::{MarkerStyle, StyleResolver},
        tooltip::{TooltipOverlay, TooltipState},
    },
    MapError, Result,
};

/// The POI viewer: filter state, marker layer, clustering, styling and
/// hover, driven by one owner on the event loop.
pub struct PoiMap {
    viewport: Viewport,
    store: PoiStore,
    features: FeatureCollection,
    clustering: Clustering,
    styles: StyleResolver,
    hover: HoverResolver,
    config: ViewerConfig,
}

impl PoiMap {
    /// Creates a map without a tooltip overlay; see [`PoiMap::attach_tooltip`].
    /// Unusable view values are sanitised by the viewport; use
    /// [`ViewerConfig::validate`] or the builder to reject them instead.
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            viewport: config.view.to_viewport(),
            store: PoiStore::new(),
            features: FeatureCollection::new(),
            clustering: Clustering::new(config.clustering.clone()),
            styles: StyleResolver::new(),
            hover: HoverResolver::new(config.hover.clone()),
            config,
        }
    }

    pub fn attach_tooltip(&mut self, tooltip: Option<TooltipOverlay>) {
        self.hover.attach_tooltip(tooltip);
    }

    /// Swaps clustering, hover and zoom-limit settings at runtime. The current
    /// center and size are kept.
    pub fn set_config(&mut self, config: ViewerConfig) -> Result<()> {
        config.validate()?;
        self.viewport
            .set_zoom_limits(config.view.min_zoom, config.view.max_zoom);
        self.clustering.set_config(config.clustering.clone());
        self.hover.set_config(config.hover.clone());
        self.config = config;
        self.view_changed();
        Ok(())
    }

    /// Installs a freshly loaded POI list and redraws the markers for the
    /// current filter
    pub fn set_poi_list(&mut self, pois: Vec<PointOfInterest>) {
        self.store.set_poi_list(pois);
        self.rebuild_features();
    }

    /// Applies a category filter and replaces the markers with the matching POIs
    pub fn update_markers(&mut self, filter: impl Into<CategoryFilter>) {
        self.store.set_category(filter);
        self.rebuild_features();
    }

    fn rebuild_features(&mut self) {
        self.features.replace_from_pois(self.store.filtered_list());
        self.hover.on_pointer_leave();
        log::debug!(
            "markers rebuilt: {} of {} POIs for {}",
            self.features.len(),
            self.store.len(),
            self.store.selected_category()
        );
    }

    /// Checks the loader once; returns whether a POI list was installed
    pub fn poll_loader(&mut self, loader: &PoiLoader) -> Result<bool> {
        match loader.try_recv() {
            None => Ok(false),
            Some(Ok(pois)) => {
                log::info!("{} POIs received from {} source", pois.len(), loader.source_name());
                self.set_poi_list(pois);
                Ok(true)
            }
            Some(Err(err)) => {
                log::warn!("{} source failed: {}", loader.source_name(), err);
                Err(err)
            }
        }
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "view center ({}, {})",
                center.lat, center.lng
            )));
        }
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        self.view_changed();
        Ok(())
    }

    pub fn pan(&mut self, delta: Point) {
        self.viewport.pan(delta);
        self.view_changed();
    }

    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        self.viewport.zoom_to(zoom, focus_point);
        self.view_changed();
    }

    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
        self.view_changed();
    }

    fn view_changed(&mut self) {
        self.clustering.invalidate();
        // Markers moved under the pointer; wait for the next move
        self.hover.on_pointer_leave();
    }

    /// Markers for the current view, reclustered only when needed
    pub fn display_features(&mut self) -> &[DisplayFeature] {
        self.clustering.clusters(
            self.features.features(),
            self.features.revision(),
            &self.viewport,
        )
    }

    /// Markers whose circle overlaps the container
    pub fn visible_features(&mut self) -> Vec<&DisplayFeature> {
        let view = self.viewport.pixel_bounds();
        self.display_features()
            .iter()
            .filter(|feature| {
                Bounds::from_point(feature.pixel())
                    .expanded(feature.hit_radius())
                    .intersects(&view)
            })
            .collect()
    }

    /// What the renderer draws: each marker with its style
    pub fn styled_features(&mut self) -> Vec<(DisplayFeature, Arc<MarkerStyle>)> {
        let display = self.clustering.clusters(
            self.features.features(),
            self.features.revision(),
            &self.viewport,
        );
        display
            .iter()
            .map(|feature| (feature.clone(), self.styles.style_for(feature)))
            .collect()
    }

    pub fn handle_event(&mut self, event: InputEvent) -> EventHandled {
        if event.position().is_some_and(|position| !position.is_finite()) {
            log::warn!("dropping {:?} with a non-finite position", event);
            return EventHandled::NotHandled;
        }
        match event {
            InputEvent::PointerMove { position } => {
                if !self.hover.is_enabled() {
                    return EventHandled::NotHandled;
                }
                self.display_features();
                let coordinate = self.viewport.pixel_to_coordinate(&position);
                self.hover
                    .on_pointer_move(position, coordinate, &self.clustering);
            }
            InputEvent::PointerLeave => self.hover.on_pointer_leave(),
            InputEvent::Resize { size } => self.set_size(size),
            InputEvent::Pan { delta } => self.pan(delta),
            InputEvent::Zoom { level, focus } => self.zoom_to(level, focus),
        }
        EventHandled::Handled
    }

    pub fn tooltip(&self) -> TooltipState {
        self.hover.tooltip()
    }

    /// Container pixel the tooltip is drawn at, when one is shown
    pub fn tooltip_position(&self) -> Option<Point> {
        self.hover
            .overlay()
            .and_then(|overlay| overlay.screen_position(&self.viewport))
    }

    pub fn hover_state(&self) -> &HoverState {
        self.hover.state()
    }

    pub fn selected_category(&self) -> &CategoryFilter {
        self.store.selected_category()
    }

    pub fn store(&self) -> &PoiStore {
        &self.store
    }

    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn styles(&self) -> &StyleResolver {
        &self.styles
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}

impl Default for PoiMap {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}
