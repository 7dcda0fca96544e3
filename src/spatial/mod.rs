pub mod clustering;
pub mod index;

pub use clustering::{Cluster, Clustering, ClusteringConfig, DisplayFeature};
pub use index::{SpatialIndex, SpatialItem};
