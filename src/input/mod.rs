pub mod events;
pub mod hover;

pub use events::{EventHandled, InputEvent};
pub use hover::{describe, HoverConfig, HoverResolver, HoverState};
