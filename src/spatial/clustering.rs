use crate::prelude::HashMap;
use crate::{
    core::{
        constants::{CLUSTER_DISTANCE_PX, CLUSTER_RADIUS, MARKER_RADIUS},
        geo::Point,
        viewport::Viewport,
    },
    data::poi::PoiCategory,
    layers::vector::MapFeature,
    spatial::index::{SpatialIndex, SpatialItem},
};
use serde::{Deserialize, Serialize};

/// A group of features drawn as one marker
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// `cluster-` followed by the id of the first member
    pub id: String,
    /// Centroid of the member coordinates (Web Mercator)
    pub coordinate: Point,
    /// Where the cluster marker sits in container pixels
    pub pixel: Point,
    /// Members in input order
    pub members: Vec<MapFeature>,
}

impl Cluster {
    fn from_members(members: Vec<MapFeature>, viewport: &Viewport) -> Self {
        let id = members
            .first()
            .map(|feature| format!("cluster-{}", feature.id))
            .unwrap_or_else(|| "cluster".to_string());
        let coordinate = Point::centroid(members.iter().map(|feature| &feature.coordinate))
            .unwrap_or_default();

        Self {
            id,
            pixel: viewport.coordinate_to_pixel(&coordinate),
            coordinate,
            members,
        }
    }

    /// Get the number of features in the cluster
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Distinct member categories in first-seen order. Members without a
    /// category are skipped.
    pub fn categories(&self) -> Vec<&PoiCategory> {
        let mut unique: Vec<&PoiCategory> = Vec::new();
        for category in self
            .members
            .iter()
            .filter_map(|feature| feature.properties.category())
        {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }
        unique
    }
}

/// What ends up on screen: a lone feature or a cluster of two or more
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayFeature {
    Single { feature: MapFeature, pixel: Point },
    Cluster(Cluster),
}

impl DisplayFeature {
    pub fn id(&self) -> &str {
        match self {
            DisplayFeature::Single { feature, .. } => &feature.id,
            DisplayFeature::Cluster(cluster) => &cluster.id,
        }
    }

    /// Marker position in container pixels
    pub fn pixel(&self) -> Point {
        match self {
            DisplayFeature::Single { pixel, .. } => *pixel,
            DisplayFeature::Cluster(cluster) => cluster.pixel,
        }
    }

    pub fn members(&self) -> &[MapFeature] {
        match self {
            DisplayFeature::Single { feature, .. } => std::slice::from_ref(feature),
            DisplayFeature::Cluster(cluster) => &cluster.members,
        }
    }

    pub fn member_count(&self) -> usize {
        self.members().len()
    }

    pub fn is_cluster(&self) -> bool {
        matches!(self, DisplayFeature::Cluster(_))
    }

    /// Radius of the drawn marker, used for hit testing
    pub fn hit_radius(&self) -> f64 {
        match self {
            DisplayFeature::Single { .. } => MARKER_RADIUS,
            DisplayFeature::Cluster(_) => CLUSTER_RADIUS,
        }
    }
}

/// Configuration for clustering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Features closer than this many screen pixels share a cluster
    pub distance_px: f64,
    /// When off, every feature is displayed on its own
    pub enabled: bool,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            distance_px: CLUSTER_DISTANCE_PX,
            enabled: true,
        }
    }
}

/// Groups features whose screen positions are closer than the configured
/// distance, transitively: if A is near B and B is near C, all three end up
/// together even when A and C are far apart.
///
/// Groups are emitted in the order of their first member.
pub fn cluster_features(
    features: &[MapFeature],
    viewport: &Viewport,
    config: &ClusteringConfig,
) -> Vec<DisplayFeature> {
    // Features that cannot be projected are left off the map
    let (features, pixels): (Vec<&MapFeature>, Vec<Point>) = features
        .iter()
        .map(|feature| (feature, viewport.coordinate_to_pixel(&feature.coordinate)))
        .filter(|(feature, pixel)| {
            let placed = pixel.is_finite();
            if !placed {
                log::warn!("feature {} has no finite screen position, skipped", feature.id);
            }
            placed
        })
        .unzip();

    if !config.enabled {
        return features
            .into_iter()
            .zip(pixels)
            .map(|(feature, pixel)| DisplayFeature::Single {
                feature: feature.clone(),
                pixel,
            })
            .collect();
    }

    let index = SpatialIndex::bulk_load(
        features
            .iter()
            .zip(&pixels)
            .enumerate()
            .map(|(i, (feature, pixel))| SpatialItem::new(feature.id.as_str(), *pixel, i))
            .collect(),
    );

    let mut groups = UnionFind::new(features.len());
    for (i, pixel) in pixels.iter().enumerate() {
        for neighbour in index.query_radius(pixel, config.distance_px) {
            // The index includes the boundary; the threshold is strict
            if neighbour.data != i && neighbour.position.distance_to(pixel) < config.distance_px {
                groups.union(i, neighbour.data);
            }
        }
    }

    let mut slot_of_root: HashMap<usize, usize> = HashMap::default();
    let mut buckets: Vec<Vec<usize>> = Vec::new();
    for i in 0..features.len() {
        let root = groups.find(i);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push(i);
    }

    buckets
        .into_iter()
        .map(|bucket| match bucket.as_slice() {
            [only] => DisplayFeature::Single {
                feature: features[*only].clone(),
                pixel: pixels[*only],
            },
            _ => DisplayFeature::Cluster(Cluster::from_members(
                bucket.iter().map(|&i| features[i].clone()).collect(),
                viewport,
            )),
        })
        .collect()
}

/// Disjoint-set forest with path halving and union by size
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CacheKey {
    viewport: Viewport,
    revision: u64,
}

/// Marker clustering with a cache keyed on the view and the feature set.
///
/// Recomputes only when the viewport, the feature revision or the config
/// changed since the last call.
pub struct Clustering {
    config: ClusteringConfig,
    display: Vec<DisplayFeature>,
    /// Display marker positions, for hit testing
    hit_index: SpatialIndex<usize>,
    cache_key: Option<CacheKey>,
}

impl Clustering {
    /// Create a new clustering instance
    pub fn new(config: ClusteringConfig) -> Self {
        Self {
            config,
            display: Vec::new(),
            hit_index: SpatialIndex::new(),
            cache_key: None,
        }
    }

    /// Clusters `features` for `viewport`, reusing the previous result when
    /// neither the view nor the feature revision moved
    pub fn clusters(
        &mut self,
        features: &[MapFeature],
        revision: u64,
        viewport: &Viewport,
    ) -> &[DisplayFeature] {
        let key = CacheKey {
            viewport: viewport.clone(),
            revision,
        };
        if self.cache_key.as_ref() == Some(&key) {
            return &self.display;
        }

        self.display = cluster_features(features, viewport, &self.config);
        self.hit_index = SpatialIndex::bulk_load(
            self.display
                .iter()
                .enumerate()
                .map(|(i, shown)| SpatialItem::new(shown.id(), shown.pixel(), i))
                .collect(),
        );
        log::trace!(
            "clustering: {} features -> {} markers at zoom {:.2}",
            features.len(),
            self.display.len(),
            viewport.zoom
        );
        self.cache_key = Some(key);

        &self.display
    }

    /// Topmost marker under `pixel`: the one with the nearest center among
    /// those whose radius plus `tolerance` reaches it
    pub fn feature_at_pixel(&self, pixel: &Point, tolerance: f64) -> Option<&DisplayFeature> {
        let reach = CLUSTER_RADIUS.max(MARKER_RADIUS) + tolerance;
        let mut best: Option<(usize, f64)> = None;

        for candidate in self.hit_index.query_radius(pixel, reach) {
            let shown = &self.display[candidate.data];
            let distance = candidate.position.distance_to(pixel);
            if distance > shown.hit_radius() + tolerance {
                continue;
            }
            let closer = match best {
                None => true,
                Some((index, best_distance)) => {
                    distance < best_distance || (distance == best_distance && candidate.data < index)
                }
            };
            if closer {
                best = Some((candidate.data, distance));
            }
        }

        best.map(|(index, _)| &self.display[index])
    }

    /// Forget the cached result
    pub fn invalidate(&mut self) {
        self.cache_key = None;
    }

    /// Update the clustering configuration
    pub fn set_config(&mut self, config: ClusteringConfig) {
        self.config = config;
        self.invalidate();
    }
}

impl Default for Clustering {
    fn default() -> Self {
        Self::new(ClusteringConfig::default())
    }
}
