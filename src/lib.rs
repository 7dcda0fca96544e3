//! # poimap
//!
//! Headless core of a point-of-interest map viewer.
//!
//! POIs are filtered by category, turned into map features, grouped into
//! clusters by on-screen proximity, styled per category and resolved into a
//! hover tooltip. Tile rendering and gesture handling are left to whatever
//! widget draws the map; this crate hands it display features, styles and a
//! tooltip payload.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod spatial;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    bounds::Bounds,
    builder::PoiMapBuilder,
    config::{ViewerConfig, ViewerProfile},
    geo::{LatLng, Point},
    map::PoiMap,
    viewport::Viewport,
};

pub use data::{
    poi::{CategoryFilter, PoiCategory, PointOfInterest},
    source::{JsonPoiSource, MockPoiSource, PoiLoader, PoiSource},
    store::PoiStore,
};

pub use input::{events::InputEvent, hover::HoverResolver};

pub use layers::vector::{FeatureCollection, FeatureProperties, MapFeature};

pub use spatial::{
    clustering::{Cluster, Clustering, DisplayFeature},
    index::SpatialIndex,
};

pub use ui::{
    style::{MarkerStyle, StyleResolver},
    tooltip::{TooltipOverlay, TooltipState},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("POI source error: {0}")]
    Source(String),
}

/// Error type alias for convenience
pub type Error = MapError;
