//! Configuration for the viewer pipeline
//!
//! Every section can be deserialised from JSON with defaults filling any
//! omitted field, or picked from one of the presets in [`ViewerProfile`].

use crate::{
    core::{
        constants::{DEFAULT_CENTER, DEFAULT_SIZE, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM},
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    input::hover::HoverConfig,
    spatial::clustering::ClusteringConfig,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerProfile {
    /// Clustering at 40 px, 5 px hover tolerance
    Standard,
    /// Every POI drawn on its own
    NoClustering,
    /// Wider cluster radius for crowded datasets
    Dense,
    Custom(ViewerConfig),
}

impl ViewerProfile {
    pub fn resolve(&self) -> ViewerConfig {
        match self {
            Self::Standard => ViewerConfig::default(),
            Self::NoClustering => ViewerConfig {
                clustering: ClusteringConfig {
                    enabled: false,
                    ..ClusteringConfig::default()
                },
                ..ViewerConfig::default()
            },
            Self::Dense => ViewerConfig {
                clustering: ClusteringConfig {
                    distance_px: 60.0,
                    ..ClusteringConfig::default()
                },
                hover: HoverConfig {
                    hit_tolerance_px: 8.0,
                    ..HoverConfig::default()
                },
                ..ViewerConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for ViewerProfile {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub view: ViewConfig,
    pub clustering: ClusteringConfig,
    pub hover: HoverConfig,
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded viewer config from {}", path.as_ref().display());
        Self::from_json_str(&raw)
    }

    /// Rejects values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.view.center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "view center {:?} is out of range",
                self.view.center
            )));
        }
        let view = &self.view;
        for (field, value) in [
            ("zoom", view.zoom),
            ("min_zoom", view.min_zoom),
            ("max_zoom", view.max_zoom),
        ] {
            if !value.is_finite() {
                return Err(MapError::Config(format!(
                    "view.{} must be a finite number, got {}",
                    field, value
                )));
            }
        }
        if !view.size.is_finite() || view.size.x < 0.0 || view.size.y < 0.0 {
            return Err(MapError::Config(format!(
                "view.size {:?} must be finite and non-negative",
                view.size
            )));
        }
        if self.view.min_zoom > self.view.max_zoom {
            return Err(MapError::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.view.min_zoom, self.view.max_zoom
            )));
        }
        if self.clustering.distance_px.is_nan() || self.clustering.distance_px < 0.0 {
            return Err(MapError::Config(
                "clustering.distance_px must be a non-negative number".to_string(),
            ));
        }
        if self.hover.hit_tolerance_px.is_nan() || self.hover.hit_tolerance_px < 0.0 {
            return Err(MapError::Config(
                "hover.hit_tolerance_px must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub center: LatLng,
    pub zoom: f64,
    pub size: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl ViewConfig {
    pub fn to_viewport(&self) -> Viewport {
        Viewport::new_with_limits(
            self.center,
            self.zoom,
            self.size,
            self.min_zoom,
            self.max_zoom,
        )
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
            size: Point::new(DEFAULT_SIZE.0, DEFAULT_SIZE.1),
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_presets() {
        let standard = ViewerProfile::Standard.resolve();
        let flat = ViewerProfile::NoClustering.resolve();
        let dense = ViewerProfile::Dense.resolve();

        assert_eq!(standard.clustering.distance_px, 40.0);
        assert!(standard.clustering.enabled);
        assert_eq!(standard.hover.hit_tolerance_px, 5.0);

        assert!(!flat.clustering.enabled);
        assert!(dense.clustering.distance_px > standard.clustering.distance_px);
    }

    #[test]
    fn test_defaults_center_on_vienna() {
        let config = ViewerConfig::default();
        assert_eq!(config.view.center, LatLng::new(48.2082, 16.3738));
        assert_eq!(config.view.zoom, 12.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json_str(
            r#"{ "view": { "zoom": 14 }, "clustering": { "distance_px": 25 } }"#,
        )
        .unwrap();

        assert_eq!(config.view.zoom, 14.0);
        assert_eq!(config.view.center, LatLng::new(48.2082, 16.3738));
        assert_eq!(config.clustering.distance_px, 25.0);
        assert!(config.clustering.enabled);
        assert_eq!(config.hover, HoverConfig::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let bad_zoom = ViewerConfig::from_json_str(r#"{ "view": { "min_zoom": 10, "max_zoom": 5 } }"#);
        assert!(matches!(bad_zoom, Err(MapError::Config(_))));

        let bad_center =
            ViewerConfig::from_json_str(r#"{ "view": { "center": { "lat": 120, "lng": 0 } } }"#);
        assert!(matches!(bad_center, Err(MapError::InvalidCoordinates(_))));

        let not_json = ViewerConfig::from_json_str("clustering = 40");
        assert!(matches!(not_json, Err(MapError::Serialization(_))));
    }

    #[test]
    fn test_view_config_builds_clamped_viewport() {
        let view = ViewConfig {
            zoom: 19.0,
            max_zoom: 16.0,
            ..ViewConfig::default()
        };
        assert_eq!(view.to_viewport().zoom, 16.0);

        let deep = ViewConfig {
            zoom: 21.0,
            max_zoom: 22.0,
            ..ViewConfig::default()
        };
        assert_eq!(deep.to_viewport().zoom, 21.0);
    }

    #[test]
    fn test_non_finite_zoom_is_rejected() {
        for view in [
            ViewConfig { zoom: f64::NAN, ..ViewConfig::default() },
            ViewConfig { min_zoom: f64::NAN, ..ViewConfig::default() },
            ViewConfig { max_zoom: f64::INFINITY, ..ViewConfig::default() },
            ViewConfig { size: Point::new(f64::NAN, 800.0), ..ViewConfig::default() },
        ] {
            let config = ViewerConfig {
                view,
                ..ViewerConfig::default()
            };
            assert!(matches!(config.validate(), Err(MapError::Config(_))));
        }
    }
}
