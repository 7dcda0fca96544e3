//! Pointer hover handling
//!
//! Turns pointer positions into tooltip content by hit testing the markers
//! the clustering produced for the current view.

use crate::{
    core::{
        constants::{HIT_TOLERANCE_PX, TOOLTIP_OFFSET},
        geo::Point,
    },
    spatial::clustering::{Clustering, DisplayFeature},
    ui::tooltip::{TooltipOverlay, TooltipState},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    /// Extra pixels around a marker that still count as a hit
    pub hit_tolerance_px: f64,
    /// Tooltip offset from the pointer in pixels
    pub tooltip_offset: (f64, f64),
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            hit_tolerance_px: HIT_TOLERANCE_PX,
            tooltip_offset: TOOLTIP_OFFSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    /// Pointer is over the display feature with this id
    Hovering { target: String },
}

/// Tooltip text for a display feature, `None` when there is nothing to show
pub fn describe(feature: &DisplayFeature) -> Option<String> {
    match feature {
        DisplayFeature::Cluster(cluster) => {
            let categories = cluster.categories();
            let listed = if categories.is_empty() {
                "unknown categories".to_string()
            } else {
                categories
                    .iter()
                    .map(|category| category.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            Some(format!("{} POIs ({})", cluster.count(), listed))
        }
        DisplayFeature::Single { feature, .. } => {
            let category = feature.properties.category()?;
            let name = feature.properties.name()?;
            Some(format!("{}: {}", category, name))
        }
    }
}

/// Two-state hover machine driving the tooltip overlay
#[derive(Debug, Clone)]
pub struct HoverResolver {
    config: HoverConfig,
    tooltip: Option<TooltipOverlay>,
    state: HoverState,
}

impl HoverResolver {
    /// Starts without an overlay; hover stays off until one is attached
    pub fn new(config: HoverConfig) -> Self {
        Self {
            config,
            tooltip: None,
            state: HoverState::Idle,
        }
    }

    pub fn attach_tooltip(&mut self, tooltip: Option<TooltipOverlay>) {
        self.state = HoverState::Idle;
        match tooltip {
            Some(overlay) => {
                let (dx, dy) = self.config.tooltip_offset;
                self.tooltip = Some(overlay.with_offset(Point::new(dx, dy)));
            }
            None => {
                log::error!("tooltip overlay not found, hover disabled");
                self.tooltip = None;
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tooltip.is_some()
    }

    /// `pixel` is in container pixels, `coordinate` is the same point in map
    /// coordinates
    pub fn on_pointer_move(
        &mut self,
        pixel: Point,
        coordinate: Point,
        clustering: &Clustering,
    ) -> &HoverState {
        let Some(tooltip) = self.tooltip.as_mut() else {
            log::trace!("pointer move at {:?} ignored, no tooltip overlay", pixel);
            return &self.state;
        };

        let hit = clustering
            .feature_at_pixel(&pixel, self.config.hit_tolerance_px)
            .and_then(|feature| describe(feature).map(|text| (feature.id().to_string(), text)));

        match hit {
            Some((target, text)) => {
                tooltip.show(text, coordinate);
                self.state = HoverState::Hovering { target };
            }
            None => {
                tooltip.hide();
                self.state = HoverState::Idle;
            }
        }
        &self.state
    }

    pub fn on_pointer_leave(&mut self) {
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.hide();
        }
        self.state = HoverState::Idle;
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    /// Current tooltip content; hidden when no overlay is attached
    pub fn tooltip(&self) -> TooltipState {
        self.tooltip
            .as_ref()
            .map(|overlay| overlay.state().clone())
            .unwrap_or_default()
    }

    pub fn overlay(&self) -> Option<&TooltipOverlay> {
        self.tooltip.as_ref()
    }

    pub fn set_config(&mut self, config: HoverConfig) {
        if let Some(overlay) = self.tooltip.take() {
            let (dx, dy) = config.tooltip_offset;
            self.tooltip = Some(overlay.with_offset(Point::new(dx, dy)));
        }
        self.config = config;
    }
}

impl Default for HoverResolver {
    fn default() -> Self {
        Self::new(HoverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{geo::LatLng, viewport::Viewport},
        data::poi::PoiCategory,
        layers::vector::{FeatureProperties, MapFeature},
    };

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(48.2082, 16.3738), 12.0, Point::new(1200.0, 800.0))
    }

    fn feature(
        viewport: &Viewport,
        id: &str,
        at: (f64, f64),
        name: Option<&str>,
        category: Option<&str>,
    ) -> MapFeature {
        MapFeature::new(
            id,
            viewport.pixel_to_coordinate(&Point::new(at.0, at.1)),
            FeatureProperties {
                name: name.map(str::to_string),
                category: category.map(PoiCategory::from),
            },
        )
    }

    fn setup(features: &[MapFeature]) -> (Viewport, Clustering, HoverResolver) {
        let viewport = viewport();
        let mut clustering = Clustering::default();
        clustering.clusters(features, 1, &viewport);
        let mut hover = HoverResolver::default();
        hover.attach_tooltip(Some(TooltipOverlay::new()));
        (viewport, clustering, hover)
    }

    fn move_to(
        hover: &mut HoverResolver,
        clustering: &Clustering,
        viewport: &Viewport,
        x: f64,
        y: f64,
    ) {
        let pixel = Point::new(x, y);
        hover.on_pointer_move(pixel, viewport.pixel_to_coordinate(&pixel), clustering);
    }

    #[test]
    fn test_single_tooltip_text() {
        let vp = viewport();
        let features = vec![feature(&vp, "p1", (100.0, 100.0), Some("Pizza Napoli"), Some("pizzeria"))];
        let (vp, clustering, mut hover) = setup(&features);

        move_to(&mut hover, &clustering, &vp, 103.0, 100.0);

        assert_eq!(hover.state(), &HoverState::Hovering { target: "p1".to_string() });
        let tooltip = hover.tooltip();
        assert!(tooltip.visible);
        assert_eq!(tooltip.text, "pizzeria: Pizza Napoli");
        let anchor = vp.coordinate_to_pixel(&tooltip.anchor.unwrap());
        assert!(anchor.distance_to(&Point::new(103.0, 100.0)) < 1e-6);
    }

    #[test]
    fn test_anchor_follows_pointer_over_same_marker() {
        let vp = viewport();
        let features = vec![feature(&vp, "p1", (100.0, 100.0), Some("Pizza Napoli"), Some("pizzeria"))];
        let (vp, clustering, mut hover) = setup(&features);

        for (x, y) in [(96.0, 100.0), (104.0, 108.0)] {
            move_to(&mut hover, &clustering, &vp, x, y);

            assert_eq!(hover.state(), &HoverState::Hovering { target: "p1".to_string() });
            let anchor = vp.coordinate_to_pixel(&hover.tooltip().anchor.unwrap());
            assert!(anchor.distance_to(&Point::new(x, y)) < 1e-6);
        }
    }

    #[test]
    fn test_cluster_tooltip_lists_unique_categories() {
        let vp = viewport();
        let features = vec![
            feature(&vp, "p1", (100.0, 100.0), Some("A"), Some("pizzeria")),
            feature(&vp, "i1", (110.0, 100.0), Some("B"), Some("ice_cream")),
            feature(&vp, "p2", (120.0, 100.0), Some("C"), Some("pizzeria")),
        ];
        let (vp, clustering, mut hover) = setup(&features);

        move_to(&mut hover, &clustering, &vp, 110.0, 100.0);

        assert_eq!(hover.tooltip().text, "3 POIs (pizzeria, ice_cream)");
        assert!(matches!(hover.state(), HoverState::Hovering { .. }));
    }

    #[test]
    fn test_cluster_without_categories() {
        let vp = viewport();
        let features = vec![
            feature(&vp, "a", (100.0, 100.0), Some("A"), None),
            feature(&vp, "b", (105.0, 100.0), Some("B"), Some("")),
        ];
        let (vp, clustering, mut hover) = setup(&features);

        move_to(&mut hover, &clustering, &vp, 102.0, 100.0);

        assert_eq!(hover.tooltip().text, "2 POIs (unknown categories)");
    }

    #[test]
    fn test_missing_metadata_hides_tooltip() {
        let vp = viewport();
        let features = vec![
            feature(&vp, "nameless", (100.0, 100.0), None, Some("pizzeria")),
            feature(&vp, "blank", (300.0, 100.0), Some(""), Some("pizzeria")),
            feature(&vp, "uncategorised", (500.0, 100.0), Some("Somewhere"), None),
        ];
        let (vp, clustering, mut hover) = setup(&features);

        for x in [100.0, 300.0, 500.0] {
            move_to(&mut hover, &clustering, &vp, x, 100.0);
            assert_eq!(hover.state(), &HoverState::Idle);
            assert!(!hover.tooltip().visible);
        }
    }

    #[test]
    fn test_leaving_a_marker_goes_idle() {
        let vp = viewport();
        let features = vec![feature(&vp, "p1", (100.0, 100.0), Some("Pizza Napoli"), Some("pizzeria"))];
        let (vp, clustering, mut hover) = setup(&features);

        move_to(&mut hover, &clustering, &vp, 100.0, 100.0);
        assert!(hover.tooltip().visible);

        // 10 px radius plus 5 px tolerance
        move_to(&mut hover, &clustering, &vp, 116.0, 100.0);
        assert_eq!(hover.state(), &HoverState::Idle);
        assert_eq!(hover.tooltip(), TooltipState::hidden());

        move_to(&mut hover, &clustering, &vp, 100.0, 100.0);
        hover.on_pointer_leave();
        assert_eq!(hover.state(), &HoverState::Idle);
        assert!(!hover.tooltip().visible);
    }

    #[test]
    fn test_no_overlay_disables_hover() {
        let vp = viewport();
        let features = vec![feature(&vp, "p1", (100.0, 100.0), Some("Pizza Napoli"), Some("pizzeria"))];
        let (vp, clustering, mut hover) = setup(&features);

        hover.attach_tooltip(None);
        assert!(!hover.is_enabled());

        move_to(&mut hover, &clustering, &vp, 100.0, 100.0);
        assert_eq!(hover.state(), &HoverState::Idle);
        assert!(!hover.tooltip().visible);
    }

    #[test]
    fn test_offset_comes_from_config() {
        let mut hover = HoverResolver::new(HoverConfig {
            tooltip_offset: (4.0, -20.0),
            ..HoverConfig::default()
        });
        hover.attach_tooltip(Some(TooltipOverlay::new()));
        assert_eq!(hover.overlay().unwrap().offset(), Point::new(4.0, -20.0));
    }
}
