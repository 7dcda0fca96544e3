use crate::core::{constants::TOOLTIP_OFFSET, geo::Point, viewport::Viewport};
use serde::{Deserialize, Serialize};

/// What the tooltip currently shows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    pub text: String,
    /// Pointer position in map coordinates (Web Mercator)
    pub anchor: Option<Point>,
}

impl TooltipState {
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// The hover tooltip attached to the map.
///
/// Holds presentation settings and the current [`TooltipState`]; drawing is
/// left to whoever owns the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipOverlay {
    offset: Point,
    state: TooltipState,
}

impl TooltipOverlay {
    pub fn new() -> Self {
        Self {
            offset: Point::new(TOOLTIP_OFFSET.0, TOOLTIP_OFFSET.1),
            state: TooltipState::hidden(),
        }
    }

    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn show(&mut self, text: impl Into<String>, anchor: Point) {
        self.state = TooltipState {
            visible: true,
            text: text.into(),
            anchor: Some(anchor),
        };
    }

    pub fn hide(&mut self) {
        self.state = TooltipState::hidden();
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Container pixel for the bottom centre of the tooltip box: the anchor
    /// moved by the offset. `None` while hidden.
    pub fn screen_position(&self, viewport: &Viewport) -> Option<Point> {
        if !self.state.visible {
            return None;
        }
        self.state
            .anchor
            .map(|anchor| viewport.coordinate_to_pixel(&anchor).add(&self.offset))
    }
}

impl Default for TooltipOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    #[test]
    fn test_defaults() {
        let tooltip = TooltipOverlay::new();
        assert_eq!(tooltip.offset(), Point::new(0.0, -15.0));
        assert_eq!(tooltip.state(), &TooltipState::hidden());
    }

    #[test]
    fn test_show_and_hide() {
        let viewport = Viewport::new(LatLng::new(48.2082, 16.3738), 12.0, Point::new(1200.0, 800.0));
        let anchor = viewport.pixel_to_coordinate(&Point::new(300.0, 200.0));
        let mut tooltip = TooltipOverlay::new();

        tooltip.show("pizzeria: Pizza Napoli", anchor);
        assert!(tooltip.state().visible);
        assert_eq!(tooltip.state().text, "pizzeria: Pizza Napoli");

        let placed = tooltip.screen_position(&viewport).unwrap();
        assert!(placed.distance_to(&Point::new(300.0, 185.0)) < 1e-6);

        tooltip.hide();
        assert!(!tooltip.state().visible);
        assert!(tooltip.state().anchor.is_none());
        assert!(tooltip.screen_position(&viewport).is_none());
    }
}
