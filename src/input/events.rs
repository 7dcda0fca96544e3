use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Input events the map reacts to. Positions are container pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer moved over the map
    PointerMove { position: Point },
    /// Pointer left the map surface
    PointerLeave,
    /// Viewport/window resize
    Resize { size: Point },
    /// Drag by a pixel offset
    Pan { delta: Point },
    /// Zoom to a level, keeping `focus` fixed when given
    Zoom { level: f64, focus: Option<Point> },
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl InputEvent {
    /// Gets the primary position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::PointerMove { position } => Some(*position),
            InputEvent::Zoom { focus, .. } => *focus,
            _ => None,
        }
    }
}
