//! Where POIs come from
//!
//! A [`PoiSource`] produces the full POI list asynchronously. The
//! [`PoiLoader`] runs a source off the event loop and hands the result back
//! through a channel that the loop polls, so the filter/cluster/style pipeline
//! itself stays synchronous.

use crate::{
    data::poi::PointOfInterest,
    prelude::{Arc, HashSet},
    MapError, Result,
};
use async_trait::async_trait;
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use once_cell::sync::Lazy;
use std::{cell::Cell, path::PathBuf};

/// Anything that can deliver the complete POI list
#[async_trait]
pub trait PoiSource: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Load every POI
    async fn load_pois(&self) -> Result<Vec<PointOfInterest>>;
}

/// Fifteen POIs around Vienna: five each of pizzerias, tourist attractions
/// and ice-cream shops.
static VIENNA_POIS: Lazy<Vec<PointOfInterest>> = Lazy::new(|| {
    vec![
        PointOfInterest::new("p1", "Pizza Napoli", "pizzeria", 48.2082, 16.3738),
        PointOfInterest::new("p2", "Pizzeria Bella", "pizzeria", 48.2000, 16.3600),
        PointOfInterest::new("p3", "Pizza Roma", "pizzeria", 48.2150, 16.3800),
        PointOfInterest::new("p4", "Pizzeria Venezia", "pizzeria", 48.1950, 16.3500),
        PointOfInterest::new("p5", "Pizza Sicilia", "pizzeria", 48.2200, 16.3900),
        PointOfInterest::new("t1", "Schönbrunn Palace", "tourist_attraction", 48.1845, 16.3119),
        PointOfInterest::new("t2", "St. Stephen's Cathedral", "tourist_attraction", 48.2085, 16.3735),
        PointOfInterest::new("t3", "Belvedere Palace", "tourist_attraction", 48.1915, 16.3808),
        PointOfInterest::new("t4", "Hofburg Palace", "tourist_attraction", 48.2075, 16.3653),
        PointOfInterest::new("t5", "Prater Park", "tourist_attraction", 48.2167, 16.4050),
        PointOfInterest::new("i1", "Gelato Venezia", "ice_cream", 48.2100, 16.3700),
        PointOfInterest::new("i2", "Eis Salon", "ice_cream", 48.2050, 16.3750),
        PointOfInterest::new("i3", "Gelateria Italia", "ice_cream", 48.2000, 16.3650),
        PointOfInterest::new("i4", "Eis Paradies", "ice_cream", 48.2150, 16.3850),
        PointOfInterest::new("i5", "Gelato Fresco", "ice_cream", 48.1950, 16.3550),
    ]
});

/// Fixed in-memory dataset
#[derive(Debug, Clone)]
pub struct MockPoiSource {
    pois: Vec<PointOfInterest>,
}

impl MockPoiSource {
    /// The bundled Vienna dataset
    pub fn vienna() -> Self {
        Self {
            pois: VIENNA_POIS.clone(),
        }
    }

    pub fn with_pois(pois: Vec<PointOfInterest>) -> Self {
        Self { pois }
    }

    /// A copy of the bundled Vienna dataset, without going through a source
    pub fn vienna_pois() -> Vec<PointOfInterest> {
        VIENNA_POIS.clone()
    }
}

impl Default for MockPoiSource {
    fn default() -> Self {
        Self::vienna()
    }
}

#[async_trait]
impl PoiSource for MockPoiSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn load_pois(&self) -> Result<Vec<PointOfInterest>> {
        Ok(self.pois.clone())
    }
}

#[derive(Debug, Clone)]
enum JsonInput {
    Inline(String),
    File(PathBuf),
}

/// A JSON array of POI records, inline or on disk
#[derive(Debug, Clone)]
pub struct JsonPoiSource {
    input: JsonInput,
}

impl JsonPoiSource {
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            input: JsonInput::Inline(json.into()),
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            input: JsonInput::File(path.into()),
        }
    }

    /// Parses and validates a POI array
    pub fn parse(json: &str) -> Result<Vec<PointOfInterest>> {
        let pois: Vec<PointOfInterest> = serde_json::from_str(json)?;

        let mut seen = HashSet::default();
        for poi in &pois {
            if !poi.position().is_valid() {
                return Err(MapError::InvalidCoordinates(format!(
                    "POI {} at ({}, {})",
                    poi.id, poi.latitude, poi.longitude
                )));
            }
            if !seen.insert(poi.id.as_str()) {
                return Err(MapError::Source(format!("duplicate POI id {}", poi.id)));
            }
        }

        Ok(pois)
    }
}

#[async_trait]
impl PoiSource for JsonPoiSource {
    fn name(&self) -> &str {
        match self.input {
            JsonInput::Inline(_) => "json",
            JsonInput::File(_) => "json-file",
        }
    }

    async fn load_pois(&self) -> Result<Vec<PointOfInterest>> {
        match &self.input {
            JsonInput::Inline(json) => Self::parse(json),
            JsonInput::File(path) => {
                let raw = std::fs::read_to_string(path)?;
                Self::parse(&raw)
            }
        }
    }
}

/// Runs a [`PoiSource`] in the background and delivers its result once.
///
/// Uses the ambient tokio runtime when there is one, otherwise a dedicated
/// thread driving the future to completion. Once the result has been taken,
/// further polls return `None`.
pub struct PoiLoader {
    rx: Receiver<Result<Vec<PointOfInterest>>>,
    source_name: String,
    delivered: Cell<bool>,
}

impl PoiLoader {
    pub fn spawn(source: Arc<dyn PoiSource>) -> Self {
        let (tx, rx) = bounded(1);
        let source_name = source.name().to_string();
        log::debug!("loading POIs from {} source", source_name);

        let task = async move {
            let result = source.load_pois().await;
            if tx.send(result).is_err() {
                log::warn!("POI loader dropped before {} finished", source.name());
            }
        };

        #[cfg(feature = "tokio-runtime")]
        {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(task);
                return Self::with_receiver(rx, source_name);
            }
        }

        std::thread::spawn(move || futures::executor::block_on(task));
        Self::with_receiver(rx, source_name)
    }

    fn with_receiver(rx: Receiver<Result<Vec<PointOfInterest>>>, source_name: String) -> Self {
        Self {
            rx,
            source_name,
            delivered: Cell::new(false),
        }
    }

    /// Non-blocking poll; `None` while the source is still working
    pub fn try_recv(&self) -> Option<Result<Vec<PointOfInterest>>> {
        if self.delivered.get() {
            return None;
        }
        let result = match self.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(self.disconnected()),
        };
        self.delivered.set(true);
        Some(result)
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    fn disconnected(&self) -> MapError {
        MapError::Source(format!("{} source stopped without a result", self.source_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::poi::PoiCategory;
    use std::time::Duration;

    #[test]
    fn test_vienna_dataset() {
        let pois = futures::executor::block_on(MockPoiSource::vienna().load_pois()).unwrap();
        assert_eq!(pois.len(), 15);
        for category in [
            PoiCategory::Pizzeria,
            PoiCategory::TouristAttraction,
            PoiCategory::IceCream,
        ] {
            assert_eq!(pois.iter().filter(|p| p.category == category).count(), 5);
        }
    }

    #[test]
    fn test_json_source_parses_records() {
        let source = JsonPoiSource::from_json(
            r#"[
                {"id":"a","name":"Alpha","category":"pizzeria","latitude":48.2,"longitude":16.37},
                {"id":"b","name":"Beta","category":"bakery","latitude":48.21,"longitude":16.38}
            ]"#,
        );
        let pois = futures::executor::block_on(source.load_pois()).unwrap();

        assert_eq!(pois.len(), 2);
        assert_eq!(pois[1].category, PoiCategory::Other("bakery".to_string()));
    }

    #[test]
    fn test_json_source_rejects_bad_records() {
        let out_of_range = JsonPoiSource::parse(
            r#"[{"id":"a","name":"Alpha","category":"pizzeria","latitude":95.0,"longitude":16.37}]"#,
        );
        assert!(matches!(out_of_range, Err(MapError::InvalidCoordinates(_))));

        let duplicate = JsonPoiSource::parse(
            r#"[
                {"id":"a","name":"Alpha","category":"pizzeria","latitude":48.2,"longitude":16.37},
                {"id":"a","name":"Again","category":"pizzeria","latitude":48.2,"longitude":16.37}
            ]"#,
        );
        assert!(matches!(duplicate, Err(MapError::Source(_))));

        let missing_field = JsonPoiSource::parse(r#"[{"id":"a"}]"#);
        assert!(matches!(missing_field, Err(MapError::Serialization(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = JsonPoiSource::from_file("/definitely/not/here/pois.json");
        let result = futures::executor::block_on(source.load_pois());
        assert!(matches!(result, Err(MapError::Io(_))));
    }

    #[test]
    fn test_loader_without_runtime_uses_thread() {
        let loader = PoiLoader::spawn(Arc::new(MockPoiSource::vienna()));
        let mut delivered = None;
        for _ in 0..500 {
            delivered = loader.try_recv();
            if delivered.is_some() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        let pois = delivered.expect("loader timed out").unwrap();
        assert_eq!(pois.len(), 15);
        assert_eq!(loader.source_name(), "mock");

        assert!(loader.try_recv().is_none());
    }
}
