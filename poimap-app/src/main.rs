use anyhow::Context;
use poimap::{
    input::events::InputEvent,
    prelude::{Arc, Duration},
    CategoryFilter, DisplayFeature, JsonPoiSource, MockPoiSource, PoiLoader, PoiMap,
    PoiMapBuilder, PoiSource, ViewerConfig,
};

const LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Headless viewer: loads POIs, walks through every category filter and
/// prints the markers and the tooltip each marker would show on hover.
///
/// Usage: `poimap-app [config.json] [pois.json]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ViewerConfig::from_json_file(&path)
            .with_context(|| format!("reading viewer config {path}"))?,
        None => ViewerConfig::default(),
    };
    let source: Arc<dyn PoiSource> = match args.next() {
        Some(path) => Arc::new(JsonPoiSource::from_file(path)),
        None => Arc::new(MockPoiSource::vienna()),
    };

    let mut map = PoiMapBuilder::new().with_config(config).build()?;
    let loader = PoiLoader::spawn(source);

    tokio::time::timeout(LOAD_TIMEOUT, async {
        while !map.poll_loader(&loader)? {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        Ok::<_, poimap::MapError>(())
    })
    .await
    .context("POI source timed out")?
    .with_context(|| format!("loading POIs from {} source", loader.source_name()))?;

    let viewport = map.viewport();
    println!(
        "{} POIs around ({:.4}, {:.4}) at zoom {}",
        map.store().len(),
        viewport.center.lat,
        viewport.center.lng,
        viewport.zoom
    );

    let filters = ["all", "pizzeria", "tourist_attraction", "ice_cream"];
    for filter in filters.iter().map(|raw| CategoryFilter::from(*raw)) {
        map.update_markers(filter);
        report(&mut map);
    }

    Ok(())
}

fn report(map: &mut PoiMap) {
    let styled = map.styled_features();
    println!(
        "\n[{}] {} features in {} markers",
        map.selected_category(),
        map.features().len(),
        styled.len()
    );

    for (feature, style) in styled {
        let kind = match &feature {
            DisplayFeature::Cluster(_) => "cluster",
            DisplayFeature::Single { .. } => "marker",
        };
        let label = style.label.as_ref().map_or("", |label| label.text.as_str());
        let pixel = feature.pixel();
        println!(
            "  {kind:<7} {:<24} at ({:>7.1}, {:>7.1}) r={} fill={} label={:?}",
            feature.id(),
            pixel.x,
            pixel.y,
            style.radius,
            style.fill.to_css(),
            label
        );

        map.handle_event(InputEvent::PointerMove { position: pixel });
        let tooltip = map.tooltip();
        if tooltip.visible {
            println!("          hover: {}", tooltip.text);
        } else {
            log::warn!("no tooltip for {}", feature.id());
        }
    }
    map.handle_event(InputEvent::PointerLeave);
}
