pub mod vector;

pub use vector::{build_features, FeatureCollection, FeatureProperties, MapFeature};
