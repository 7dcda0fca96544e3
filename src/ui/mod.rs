pub mod style;
pub mod tooltip;

pub use style::{category_color, Color, LabelStyle, MarkerStyle, Shape, StyleResolver};
pub use tooltip::{TooltipOverlay, TooltipState};
