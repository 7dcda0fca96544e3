use poimap::{
    core::geo::{LatLng, Point},
    input::events::InputEvent,
    MockPoiSource, PoiMapBuilder, PoiSource,
};

/// Example of driving poimap without any UI: load the Vienna dataset,
/// move the view around and watch the clusters split and merge.
fn main() -> poimap::Result<()> {
    let pois = futures::executor::block_on(MockPoiSource::vienna().load_pois())?;

    let mut map = PoiMapBuilder::new()
        .with_center_and_zoom(LatLng::new(48.2082, 16.3738), 12.0)
        .with_size(Point::new(1024.0, 768.0))
        .with_pois(pois)
        .build()?;

    println!("Map created with {} POIs", map.store().len());

    for zoom in [11.0, 12.0, 13.0, 14.0, 16.0] {
        map.zoom_to(zoom, None);
        let markers = map.display_features();
        let clusters = markers.iter().filter(|m| m.is_cluster()).count();
        println!(
            "   zoom {:>4}: {:>2} markers, {} of them clusters",
            zoom,
            markers.len(),
            clusters
        );
    }

    println!("\nPanning at zoom 14:");
    map.zoom_to(14.0, None);
    for (dx, dy) in [(100.0, 0.0), (0.0, 100.0), (-50.0, -50.0)] {
        let old_center = map.viewport().center;
        map.handle_event(InputEvent::Pan {
            delta: Point::new(dx, dy),
        });
        let new_center = map.viewport().center;
        println!(
            "   Pan by ({}, {}) - Center moved from ({:.4}, {:.4}) to ({:.4}, {:.4})",
            dx, dy, old_center.lat, old_center.lng, new_center.lat, new_center.lng
        );
    }

    println!("\nHovering every marker:");
    let pixels: Vec<Point> = map.display_features().iter().map(|m| m.pixel()).collect();
    for pixel in pixels {
        map.handle_event(InputEvent::PointerMove { position: pixel });
        let tooltip = map.tooltip();
        if tooltip.visible {
            println!("   ({:>7.1}, {:>7.1}) {}", pixel.x, pixel.y, tooltip.text);
        }
    }

    Ok(())
}
