use crate::core::{
    bounds::Bounds,
    constants::{EARTH_RADIUS, MAX_ZOOM, MIN_ZOOM, TILE_SIZE},
    geo::{LatLng, Point},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Half the projected world width in Web Mercator metres
const HALF_WORLD: f64 = PI * EARTH_RADIUS;

/// Manages the current view of the map: center, zoom, and screen dimensions.
///
/// Screen ("container") pixels have their origin in the top-left corner of
/// the map widget. Map coordinates are Web Mercator metres, the same display
/// coordinate system the features are stored in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport with the default zoom limits
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self::new_with_limits(center, zoom, size, MIN_ZOOM, MAX_ZOOM)
    }

    /// Creates a viewport whose zoom is clamped once against the given limits.
    /// Non-finite inputs fall back to defaults instead of poisoning the
    /// projection.
    pub fn new_with_limits(
        center: LatLng,
        zoom: f64,
        size: Point,
        min_zoom: f64,
        max_zoom: f64,
    ) -> Self {
        let (min_zoom, max_zoom) = Self::sanitize_limits(min_zoom, max_zoom);
        let zoom = if zoom.is_finite() {
            zoom.clamp(min_zoom, max_zoom)
        } else {
            log::warn!("non-finite zoom {} replaced by {}", zoom, min_zoom);
            min_zoom
        };
        let center = if center.is_finite() {
            Self::clamp_center(center)
        } else {
            log::warn!("non-finite center {:?} replaced by the origin", center);
            LatLng::default()
        };
        let size = if Self::is_valid_size(&size) {
            size
        } else {
            log::warn!("invalid viewport size {:?} replaced by zero", size);
            Point::default()
        };

        Self {
            center,
            zoom,
            size,
            min_zoom,
            max_zoom,
        }
    }

    /// Sets the center of the viewport, clamped to the projectable world.
    /// Non-finite centers are ignored.
    pub fn set_center(&mut self, center: LatLng) {
        if !center.is_finite() {
            log::warn!("ignoring non-finite center {:?}", center);
            return;
        }
        self.center = Self::clamp_center(center);
    }

    /// Sets the zoom level, clamping to valid range. Non-finite levels are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            log::warn!("ignoring non-finite zoom {}", zoom);
            return;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the viewport size; negative or non-finite sizes are ignored
    pub fn set_size(&mut self, size: Point) {
        if !Self::is_valid_size(&size) {
            log::warn!("ignoring invalid viewport size {:?}", size);
            return;
        }
        self.size = size;
    }

    /// Sets the zoom limits. Non-finite limits fall back to the defaults and
    /// reversed limits are swapped.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = Self::sanitize_limits(min_zoom, max_zoom);
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    fn sanitize_limits(min_zoom: f64, max_zoom: f64) -> (f64, f64) {
        if !min_zoom.is_finite() || !max_zoom.is_finite() {
            log::warn!(
                "non-finite zoom limits {}..{}, using defaults for the bad side",
                min_zoom,
                max_zoom
            );
        }
        let min_zoom = if min_zoom.is_finite() { min_zoom } else { MIN_ZOOM };
        let max_zoom = if max_zoom.is_finite() { max_zoom } else { MAX_ZOOM };
        if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            log::warn!("zoom limits {}..{} reversed, swapping", min_zoom, max_zoom);
            (max_zoom, min_zoom)
        }
    }

    fn is_valid_size(size: &Point) -> bool {
        size.is_finite() && size.x >= 0.0 && size.y >= 0.0
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Width of the whole world in pixels at the current zoom
    fn world_size(&self) -> f64 {
        TILE_SIZE * self.scale()
    }

    /// Projects a Web Mercator coordinate to world pixel coordinates
    pub fn project_coordinate(&self, coordinate: &Point) -> Point {
        let world = self.world_size();
        Point::new(
            (coordinate.x + HALF_WORLD) / (2.0 * HALF_WORLD) * world,
            (HALF_WORLD - coordinate.y) / (2.0 * HALF_WORLD) * world,
        )
    }

    /// Inverse of [`Viewport::project_coordinate`]
    pub fn unproject_coordinate(&self, pixel: &Point) -> Point {
        let world = self.world_size();
        Point::new(
            pixel.x / world * (2.0 * HALF_WORLD) - HALF_WORLD,
            HALF_WORLD - pixel.y / world * (2.0 * HALF_WORLD),
        )
    }

    /// Projects a LatLng to world pixel coordinates
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        self.project_coordinate(&lat_lng.to_mercator())
    }

    /// World pixel position of the container's top-left corner
    fn pixel_origin(&self) -> Point {
        let center = self.project(&self.center);
        Point::new(center.x - self.size.x / 2.0, center.y - self.size.y / 2.0)
    }

    /// Converts a map coordinate (Web Mercator) to container pixels
    pub fn coordinate_to_pixel(&self, coordinate: &Point) -> Point {
        self.project_coordinate(coordinate)
            .subtract(&self.pixel_origin())
    }

    /// Converts container pixels to a map coordinate (Web Mercator)
    pub fn pixel_to_coordinate(&self, pixel: &Point) -> Point {
        self.unproject_coordinate(&pixel.add(&self.pixel_origin()))
    }

    /// Converts a geographical coordinate to container pixels
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        self.coordinate_to_pixel(&lat_lng.to_mercator())
    }

    /// Converts container pixels back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        LatLng::from_mercator(self.pixel_to_coordinate(pixel))
    }

    /// Pans the viewport by the given pixel offset.
    /// Dragging the map right (positive `delta.x`) moves the center west.
    pub fn pan(&mut self, delta: Point) {
        if !delta.is_finite() {
            log::warn!("ignoring non-finite pan {:?}", delta);
            return;
        }
        let center_px = Point::new(self.size.x / 2.0, self.size.y / 2.0);
        let new_center = self.pixel_to_lat_lng(&center_px.subtract(&delta));
        self.set_center(new_center);
    }

    /// Zooms the viewport, keeping `focus_point` (container pixels) fixed if given
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        if !zoom.is_finite() {
            log::warn!("ignoring non-finite zoom {}", zoom);
            return;
        }
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);

        // No-op if zoom does not change significantly
        if (new_zoom - self.zoom).abs() < 0.001 {
            return;
        }

        match focus_point.filter(Point::is_finite) {
            Some(focus_screen) => {
                let focus_lat_lng = self.pixel_to_lat_lng(&focus_screen);
                self.zoom = new_zoom;
                let drifted = self.lat_lng_to_pixel(&focus_lat_lng);
                self.pan(focus_screen.subtract(&drifted));
            }
            None => self.zoom = new_zoom,
        }
    }

    /// The container rectangle in pixels
    pub fn pixel_bounds(&self) -> Bounds {
        Bounds::from_coords(0.0, 0.0, self.size.x, self.size.y)
    }

    fn clamp_center(center: LatLng) -> LatLng {
        LatLng::new(LatLng::clamp_lat(center.lat), center.lng.clamp(-180.0, 180.0))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}
