//! Viewer-wide defaults for projection, clustering, markers and the initial view.

/// Default square tile size in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Web Mercator sphere radius in metres (EPSG:3857).
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Markers closer than this on screen are merged into one cluster.
pub const CLUSTER_DISTANCE_PX: f64 = 40.0;

/// Pointer slack around a marker that still counts as hovering it.
pub const HIT_TOLERANCE_PX: f64 = 5.0;

/// Radius of a single POI marker.
pub const MARKER_RADIUS: f64 = 10.0;

/// Radius of a cluster marker.
pub const CLUSTER_RADIUS: f64 = 15.0;

/// Vertical offset of the category letter above a single marker.
pub const MARKER_LABEL_OFFSET_Y: f64 = -15.0;

/// Tooltip overlay offset from its anchor, in pixels.
pub const TOOLTIP_OFFSET: (f64, f64) = (0.0, -15.0);

/// Initial view: Vienna city centre.
pub const DEFAULT_CENTER: (f64, f64) = (48.2082, 16.3738);

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Initial container size in pixels.
pub const DEFAULT_SIZE: (f64, f64) = (1200.0, 800.0);

/// Zoom limits used when none are configured.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 20.0;
