use crate::{
    core::geo::Point,
    data::poi::{PoiCategory, PointOfInterest},
};
use serde::{Deserialize, Serialize};

/// Metadata carried by a feature. Either field may be absent on features that
/// did not come from a well-formed POI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub name: Option<String>,
    pub category: Option<PoiCategory>,
}

impl FeatureProperties {
    /// Name, treating the empty string as missing
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Category, treating the empty string as missing
    pub fn category(&self) -> Option<&PoiCategory> {
        self.category
            .as_ref()
            .filter(|category| !category.as_str().is_empty())
    }
}

/// A point on the map tagged with POI metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeature {
    /// Id of the POI this feature was built from
    pub id: String,
    /// Position in Web Mercator metres
    pub coordinate: Point,
    pub properties: FeatureProperties,
}

impl MapFeature {
    pub fn new(id: impl Into<String>, coordinate: Point, properties: FeatureProperties) -> Self {
        Self {
            id: id.into(),
            coordinate,
            properties,
        }
    }

    /// Reprojects the POI into display coordinates and copies its metadata
    pub fn from_poi(poi: &PointOfInterest) -> Self {
        Self::new(
            poi.id.clone(),
            poi.position().to_mercator(),
            FeatureProperties {
                name: Some(poi.name.clone()),
                category: Some(poi.category.clone()),
            },
        )
    }
}

/// One feature per POI, in input order
pub fn build_features<'a>(pois: impl IntoIterator<Item = &'a PointOfInterest>) -> Vec<MapFeature> {
    pois.into_iter().map(MapFeature::from_poi).collect()
}

/// The feature set backing the marker layer.
///
/// Always replaced wholesale; the revision counter tells downstream caches
/// that the contents changed.
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    features: Vec<MapFeature>,
    revision: u64,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear-then-add
    pub fn replace(&mut self, features: Vec<MapFeature>) {
        log::debug!(
            "feature collection: replacing {} features with {}",
            self.features.len(),
            features.len()
        );
        self.features = features;
        self.revision += 1;
    }

    /// Rebuilds the collection from a POI list
    pub fn replace_from_pois<'a>(&mut self, pois: impl IntoIterator<Item = &'a PointOfInterest>) {
        self.replace(build_features(pois));
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn features(&self) -> &[MapFeature] {
        &self.features
    }

    pub fn get(&self, id: &str) -> Option<&MapFeature> {
        self.features.iter().find(|feature| feature.id == id)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
