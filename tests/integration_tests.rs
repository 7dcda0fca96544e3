use poimap::prelude::*;

/// Integration tests for the scenarios a viewer actually goes through:
/// load POIs, filter, cluster, style and hover.
#[cfg(test)]
mod integration_tests {
    use super::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Five pizzerias inside 100 m of each other plus the rest of the city
    fn crowded_pizzerias() -> Vec<PointOfInterest> {
        (0..5)
            .map(|i| {
                PointOfInterest::new(
                    format!("p{i}"),
                    format!("Pizza {i}"),
                    "pizzeria",
                    48.2082 + i as f64 * 0.00015,
                    16.3738 - i as f64 * 0.00015,
                )
            })
            .collect()
    }

    fn vienna_map() -> PoiMap {
        PoiMapBuilder::new().build().unwrap()
    }

    /// Deterministic scatter of POIs around the city center
    fn scattered_pois(count: usize, seed: u64) -> Vec<PointOfInterest> {
        let mut state = seed;
        let mut next = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        };
        (0..count)
            .map(|i| {
                PointOfInterest::new(
                    format!("s{i}"),
                    format!("Spot {i}"),
                    ["pizzeria", "ice_cream", "tourist_attraction", "bakery"][i % 4],
                    48.17 + next() * 0.08,
                    16.30 + next() * 0.12,
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_loader_on_runtime_feeds_the_map() {
        init_logging();

        let mut map = vienna_map();
        let loader = PoiLoader::spawn(Arc::new(MockPoiSource::vienna()));

        let installed = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if map.poll_loader(&loader).unwrap() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;

        assert!(installed.is_ok(), "loader never delivered");
        assert_eq!(map.store().len(), 15);
        assert_eq!(map.features().len(), 15);
    }

    #[tokio::test]
    async fn test_json_source_on_runtime() {
        let source = JsonPoiSource::from_json(
            r#"[{"id":"x","name":"Eis Greissler","category":"ice_cream","latitude":48.2,"longitude":16.36}]"#,
        );
        let pois = source.load_pois().await.unwrap();
        assert_eq!(pois[0].category, PoiCategory::IceCream);
    }

    #[test]
    fn test_ice_cream_filter() {
        let mut map = vienna_map();
        map.set_poi_list(MockPoiSource::vienna_pois());
        map.update_markers("ice_cream");

        let filtered = map.store().filtered_list();
        assert_eq!(filtered.len(), 5);
        assert!(filtered.iter().all(|poi| poi.category == PoiCategory::IceCream));
        assert_eq!(map.features().len(), 5);
    }

    #[test]
    fn test_crowded_pizzerias_hover_as_one_cluster() {
        init_logging();

        let mut map = PoiMapBuilder::new()
            .with_pois(crowded_pizzerias())
            .build()
            .unwrap();

        let markers = map.display_features().to_vec();
        assert_eq!(markers.len(), 1);
        assert!(markers[0].is_cluster());
        assert_eq!(markers[0].member_count(), 5);

        map.handle_event(InputEvent::PointerMove {
            position: markers[0].pixel(),
        });
        assert_eq!(map.tooltip().text, "5 POIs (pizzeria)");
        assert!(map.tooltip().visible);
    }

    #[test]
    fn test_hover_single_then_move_off() {
        let mut map = PoiMapBuilder::new()
            .with_pois(vec![PointOfInterest::new(
                "p1",
                "Pizza Napoli",
                "pizzeria",
                48.2082,
                16.3738,
            )])
            .build()
            .unwrap();

        // The center of the view is where the POI sits
        map.handle_event(InputEvent::PointerMove {
            position: Point::new(604.0, 397.0),
        });
        assert_eq!(map.tooltip().text, "pizzeria: Pizza Napoli");
        assert!(matches!(map.hover_state(), HoverState::Hovering { .. }));

        map.handle_event(InputEvent::PointerMove {
            position: Point::new(100.0, 100.0),
        });
        assert_eq!(map.hover_state(), &HoverState::Idle);
        assert!(!map.tooltip().visible);
    }

    #[test]
    fn test_unknown_category_renders_gray() {
        let mut map = PoiMapBuilder::new()
            .with_pois(vec![PointOfInterest::new(
                "b1", "Backstube", "bakery", 48.2082, 16.3738,
            )])
            .build()
            .unwrap();

        let styled = map.styled_features();
        assert_eq!(styled.len(), 1);
        assert_eq!(styled[0].1.fill, Color::GRAY);
    }

    #[test]
    fn test_close_pairs_always_share_a_marker() {
        let pois = scattered_pois(120, 7);
        let mut map = PoiMapBuilder::new().with_pois(pois).build().unwrap();

        for zoom in [11.0, 12.0, 13.5, 15.0] {
            map.zoom_to(zoom, None);
            let viewport = map.viewport().clone();
            let markers = map.display_features().to_vec();

            let marker_of = |id: &str| {
                markers
                    .iter()
                    .position(|m| m.members().iter().any(|f| f.id == id))
            };

            let features = map.features().features();
            assert_eq!(
                markers.iter().map(DisplayFeature::member_count).sum::<usize>(),
                features.len()
            );
            for (i, a) in features.iter().enumerate() {
                for b in &features[i + 1..] {
                    let gap = viewport
                        .coordinate_to_pixel(&a.coordinate)
                        .distance_to(&viewport.coordinate_to_pixel(&b.coordinate));
                    if gap < 40.0 {
                        assert_eq!(marker_of(&a.id), marker_of(&b.id), "zoom {zoom}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_style_cache_is_shared_across_renders() {
        let mut map = PoiMapBuilder::new()
            .with_profile(ViewerProfile::NoClustering)
            .with_pois(MockPoiSource::vienna_pois())
            .with_category("tourist_attraction")
            .build()
            .unwrap();

        let first = map.styled_features();
        let second = map.styled_features();
        assert_eq!(first.len(), 5);
        for ((_, a), (_, b)) in first.iter().zip(&second) {
            assert!(Arc::ptr_eq(a, b));
        }
        assert!(Arc::ptr_eq(&first[0].1, &first[4].1));
        assert_eq!(map.styles().cached_len(), 1);
    }

    #[test]
    fn test_config_file_drives_the_map() {
        let path = std::env::temp_dir().join(format!("poimap-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "view": { "zoom": 15, "size": { "x": 800, "y": 600 } }, "clustering": { "enabled": false } }"#,
        )
        .unwrap();

        let config = ViewerConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let map = PoiMapBuilder::new().with_config(config).build().unwrap();
        assert_eq!(map.viewport().zoom, 15.0);
        assert_eq!(map.viewport().size, Point::new(800.0, 600.0));
        assert!(!map.config().clustering.enabled);
    }
}
