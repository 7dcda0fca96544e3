use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Category of a point of interest.
///
/// Categories travel as plain strings, so anything outside the known set is
/// kept verbatim in [`PoiCategory::Other`] instead of being rejected.
/// Equality and hashing go through [`PoiCategory::as_str`], so an `Other`
/// holding a known name is the same category as the named variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PoiCategory {
    Pizzeria,
    TouristAttraction,
    IceCream,
    Other(String),
}

impl PoiCategory {
    pub fn as_str(&self) -> &str {
        match self {
            PoiCategory::Pizzeria => "pizzeria",
            PoiCategory::TouristAttraction => "tourist_attraction",
            PoiCategory::IceCream => "ice_cream",
            PoiCategory::Other(raw) => raw,
        }
    }
}

impl PartialEq for PoiCategory {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for PoiCategory {}

impl Hash for PoiCategory {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<&str> for PoiCategory {
    fn from(raw: &str) -> Self {
        match raw {
            "pizzeria" => PoiCategory::Pizzeria,
            "tourist_attraction" => PoiCategory::TouristAttraction,
            "ice_cream" => PoiCategory::IceCream,
            other => PoiCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for PoiCategory {
    fn from(raw: String) -> Self {
        PoiCategory::from(raw.as_str())
    }
}

impl From<PoiCategory> for String {
    fn from(category: PoiCategory) -> Self {
        match category {
            PoiCategory::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which POIs are currently shown
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(PoiCategory),
}

impl CategoryFilter {
    /// Literal string comparison against the POI's category
    pub fn matches(&self, category: &PoiCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted.as_str() == category.as_str(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

impl From<PoiCategory> for CategoryFilter {
    fn from(category: PoiCategory) -> Self {
        CategoryFilter::Only(category)
    }
}

impl From<&str> for CategoryFilter {
    fn from(raw: &str) -> Self {
        match raw {
            "all" => CategoryFilter::All,
            other => CategoryFilter::Only(PoiCategory::from(other)),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(raw: String) -> Self {
        CategoryFilter::from(raw.as_str())
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::from(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, categorised location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub category: PoiCategory,
    pub latitude: f64,
    pub longitude: f64,
}

impl PointOfInterest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<PoiCategory>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            latitude,
            longitude,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_strings() {
        assert_eq!(PoiCategory::from("ice_cream"), PoiCategory::IceCream);
        assert_eq!(PoiCategory::TouristAttraction.to_string(), "tourist_attraction");

        let bakery = PoiCategory::from("bakery");
        assert_eq!(bakery, PoiCategory::Other("bakery".to_string()));
        assert_eq!(bakery.as_str(), "bakery");
    }

    #[test]
    fn test_other_with_known_name_equals_variant() {
        let spelled_out = PoiCategory::Other("pizzeria".to_string());
        assert_eq!(spelled_out, PoiCategory::Pizzeria);
        assert_ne!(spelled_out, PoiCategory::IceCream);

        let mut seen = crate::prelude::HashSet::default();
        seen.insert(PoiCategory::Pizzeria);
        assert!(!seen.insert(spelled_out));
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from("pizzeria"),
            CategoryFilter::Only(PoiCategory::Pizzeria)
        );
        assert_eq!(CategoryFilter::default(), CategoryFilter::All);
    }

    #[test]
    fn test_filter_matches_unknown_category_literally() {
        let filter = CategoryFilter::from("bakery");
        assert!(filter.matches(&PoiCategory::from("bakery")));
        assert!(!filter.matches(&PoiCategory::Pizzeria));
        assert!(CategoryFilter::All.matches(&PoiCategory::from("anything")));
    }

    #[test]
    fn test_poi_json_shape() {
        let poi: PointOfInterest = serde_json::from_str(
            r#"{"id":"p1","name":"Pizza Napoli","category":"pizzeria","latitude":48.2082,"longitude":16.3738}"#,
        )
        .unwrap();

        assert_eq!(poi.category, PoiCategory::Pizzeria);
        assert_eq!(poi.position(), LatLng::new(48.2082, 16.3738));

        let json = serde_json::to_value(&poi).unwrap();
        assert_eq!(json["category"], "pizzeria");
    }
}
