use crate::{
    core::constants::{CLUSTER_RADIUS, MARKER_LABEL_OFFSET_Y, MARKER_RADIUS},
    data::poi::PoiCategory,
    prelude::{Arc, HashMap},
    spatial::clustering::DisplayFeature,
};
use serde::{Deserialize, Serialize};

/// RGBA colour with straight (unmultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `alpha` in 0.0..=1.0, as in CSS `rgba()`
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self::new(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// CSS notation, `rgba(r, g, b, a)`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.alpha())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Circle,
}

/// Text drawn on top of a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub text: String,
    pub fill: Color,
    /// Vertical offset in pixels, negative is up
    pub offset_y: f64,
}

/// Everything a renderer needs to draw one marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub shape: Shape,
    pub radius: f64,
    pub fill: Color,
    pub label: Option<LabelStyle>,
}

impl MarkerStyle {
    /// Coloured circle labelled with the category's initial
    pub fn single(category: Option<&PoiCategory>) -> Self {
        let label = category
            .and_then(|category| category.as_str().chars().next())
            .map(|initial| LabelStyle {
                text: initial.to_uppercase().collect(),
                fill: Color::WHITE,
                offset_y: MARKER_LABEL_OFFSET_Y,
            });

        Self {
            shape: Shape::Circle,
            radius: MARKER_RADIUS,
            fill: category_color(category),
            label,
        }
    }

    /// Dark translucent circle labelled with the member count
    pub fn cluster(count: usize) -> Self {
        Self {
            shape: Shape::Circle,
            radius: CLUSTER_RADIUS,
            fill: Color::rgba(0, 0, 0, 0.6),
            label: Some(LabelStyle {
                text: count.to_string(),
                fill: Color::WHITE,
                offset_y: 0.0,
            }),
        }
    }
}

/// Fill colour for a single marker
pub fn category_color(category: Option<&PoiCategory>) -> Color {
    match category.map(PoiCategory::as_str) {
        Some("pizzeria") => Color::RED,
        Some("tourist_attraction") => Color::BLUE,
        Some("ice_cream") => Color::GREEN,
        _ => Color::GRAY,
    }
}

/// Maps display features to marker styles.
///
/// Single-marker styles are memoised per category, so every feature of one
/// category shares an `Arc`. Cluster styles depend on the member count and
/// are built fresh each time.
#[derive(Debug, Default)]
pub struct StyleResolver {
    cache: HashMap<String, Arc<MarkerStyle>>,
}

impl StyleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style_for(&mut self, feature: &DisplayFeature) -> Arc<MarkerStyle> {
        match feature {
            DisplayFeature::Cluster(cluster) if cluster.count() > 1 => {
                Arc::new(MarkerStyle::cluster(cluster.count()))
            }
            other => {
                let category = other
                    .members()
                    .first()
                    .and_then(|feature| feature.properties.category());
                self.style_for_category(category)
            }
        }
    }

    /// Cached style for a lone marker; `None` and `""` share the gray entry
    pub fn style_for_category(&mut self, category: Option<&PoiCategory>) -> Arc<MarkerStyle> {
        let category = category.filter(|category| !category.as_str().is_empty());
        let key = category.map(PoiCategory::as_str).unwrap_or_default();

        if let Some(style) = self.cache.get(key) {
            return Arc::clone(style);
        }

        log::debug!("style cache miss for category {:?}", key);
        let style = Arc::new(MarkerStyle::single(category));
        self.cache.insert(key.to_string(), Arc::clone(&style));
        style
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
