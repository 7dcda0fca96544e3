//! Prelude module for common poimap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use poimap::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    builder::PoiMapBuilder,
    config::{ViewConfig, ViewerConfig, ViewerProfile},
    geo::{LatLng, Point},
    map::PoiMap,
    viewport::Viewport,
};

pub use crate::data::{
    poi::{CategoryFilter, PoiCategory, PointOfInterest},
    source::{JsonPoiSource, MockPoiSource, PoiLoader, PoiSource},
    store::PoiStore,
};

pub use crate::input::{
    events::{EventHandled, InputEvent},
    hover::{HoverConfig, HoverResolver, HoverState},
};

pub use crate::layers::vector::{build_features, FeatureCollection, FeatureProperties, MapFeature};

pub use crate::spatial::{
    clustering::{Cluster, Clustering, ClusteringConfig, DisplayFeature},
    index::{SpatialIndex, SpatialItem},
};

pub use crate::ui::{
    style::{Color, MarkerStyle, StyleResolver},
    tooltip::{TooltipOverlay, TooltipState},
};

pub use crate::{Error as MapError, Result};

pub use std::{sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
