pub mod poi;
pub mod source;
pub mod store;

pub use poi::{CategoryFilter, PoiCategory, PointOfInterest};
pub use source::{JsonPoiSource, MockPoiSource, PoiLoader, PoiSource};
pub use store::PoiStore;
