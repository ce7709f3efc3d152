//! Map renderer: projects stop coordinates onto the plane and emits a
//! four-layer vector drawing of the network.

pub mod svg;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{catalogue::Catalogue, geo::Coordinate};
use svg::{Document, Point};

const EPSILON: f64 = 1e-6;

/// A color as accepted by the external interface: a named string, an
/// `[r, g, b]` triple, or an `[r, g, b, a]` quadruple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl Color {
    pub fn to_svg_string(&self) -> String {
        match self {
            Color::Named(name) => name.clone(),
            Color::Rgb(r, g, b) => format!("rgb({r},{g},{b})"),
            Color::Rgba(r, g, b, a) => format!("rgba({r},{g},{b},{a})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: (f64, f64),
    pub stop_label_font_size: u32,
    pub stop_label_offset: (f64, f64),
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

/// Isotropic lat/lng -> canvas projection. The zoom factor is computed
/// independently per axis from the referenced coordinates' bounding box;
/// the smaller of the two wins, and a degenerate axis (zero spread) defers
/// entirely to the other.
struct SphereProjector {
    min_lon: f64,
    max_lat: f64,
    padding: f64,
    zoom: f64,
}

impl SphereProjector {
    fn build(points: &[Coordinate], width: f64, height: f64, padding: f64) -> Self {
        if points.is_empty() {
            return Self {
                min_lon: 0.0,
                max_lat: 0.0,
                padding,
                zoom: 0.0,
            };
        }
        let min_lon = points.iter().map(|p| p.longitude).fold(f64::INFINITY, f64::min);
        let max_lon = points
            .iter()
            .map(|p| p.longitude)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_lat = points.iter().map(|p| p.latitude).fold(f64::INFINITY, f64::min);
        let max_lat = points
            .iter()
            .map(|p| p.latitude)
            .fold(f64::NEG_INFINITY, f64::max);

        let width_zoom = if (max_lon - min_lon).abs() > EPSILON {
            Some((width - 2.0 * padding) / (max_lon - min_lon))
        } else {
            None
        };
        let height_zoom = if (max_lat - min_lat).abs() > EPSILON {
            Some((height - 2.0 * padding) / (max_lat - min_lat))
        } else {
            None
        };

        let zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(w), None) => w,
            (None, Some(h)) => h,
            (None, None) => 0.0,
        };

        Self {
            min_lon,
            max_lat,
            padding,
            zoom,
        }
    }

    fn project(&self, coordinate: &Coordinate) -> Point {
        Point {
            x: (coordinate.longitude - self.min_lon) * self.zoom + self.padding,
            y: (self.max_lat - coordinate.latitude) * self.zoom + self.padding,
        }
    }
}

/// Cycles `settings.color_palette` by bus-iteration order; falls back to
/// black when the palette is empty (a valid, if degenerate, render settings
/// value) rather than panicking on the out-of-bounds index.
fn palette_color(settings: &RenderSettings, i: usize) -> Color {
    settings
        .color_palette
        .get(i % settings.color_palette.len().max(1))
        .cloned()
        .unwrap_or(Color::Named("black".into()))
}

/// Renders the network's buses and stops as a standalone SVG document.
/// Buses and stops are iterated in ascending lexicographic name order so
/// the output is deterministic; the palette cycles by bus-iteration order.
pub fn render_map(catalogue: &Catalogue, settings: &RenderSettings) -> String {
    let mut buses: Vec<_> = catalogue.buses().iter().collect();
    buses.sort_unstable_by(|a, b| a.name.cmp(&b.name));

    let referenced_stop_indices: BTreeSet<u32> = buses
        .iter()
        .flat_map(|bus| bus.route.iter().copied())
        .collect();
    let coordinates: Vec<Coordinate> = referenced_stop_indices
        .iter()
        .map(|&idx| catalogue.stops()[idx as usize].coordinate)
        .collect();
    let projector = SphereProjector::build(&coordinates, settings.width, settings.height, settings.padding);

    let mut doc = Document::new();

    // Layer 1: bus polylines.
    for (i, bus) in buses.iter().enumerate() {
        if bus.route.is_empty() {
            continue;
        }
        let color = palette_color(settings, i);
        let points: Vec<Point> = bus
            .traversal()
            .iter()
            .map(|&idx| projector.project(&catalogue.stops()[idx as usize].coordinate))
            .collect();
        doc.add_polyline(&points, &color, settings.line_width);
    }

    // Layer 2: bus name labels, at each terminus for linear routes.
    for (i, bus) in buses.iter().enumerate() {
        if bus.route.is_empty() {
            continue;
        }
        let color = palette_color(settings, i);
        let first = projector.project(&catalogue.stops()[bus.route[0] as usize].coordinate);
        doc.add_label(
            first,
            settings.bus_label_offset,
            settings.bus_label_font_size,
            &bus.name,
            &color.to_svg_string(),
            &settings.underlayer_color,
            settings.underlayer_width,
        );
        if !bus.is_circle {
            if let Some(&last_idx) = bus.route.last() {
                if last_idx != bus.route[0] {
                    let last = projector.project(&catalogue.stops()[last_idx as usize].coordinate);
                    doc.add_label(
                        last,
                        settings.bus_label_offset,
                        settings.bus_label_font_size,
                        &bus.name,
                        &color.to_svg_string(),
                        &settings.underlayer_color,
                        settings.underlayer_width,
                    );
                }
            }
        }
    }

    let mut stop_names: Vec<&str> = referenced_stop_indices
        .iter()
        .map(|&idx| catalogue.stops()[idx as usize].name.as_ref())
        .collect();
    stop_names.sort_unstable();

    // Layer 3: stop circles.
    for &name in &stop_names {
        let stop = catalogue.find_stop(name).expect("referenced stop exists");
        doc.add_circle(projector.project(&stop.coordinate), settings.stop_radius, "white");
    }

    // Layer 4: stop name labels.
    for &name in &stop_names {
        let stop = catalogue.find_stop(name).expect("referenced stop exists");
        doc.add_label(
            projector.project(&stop.coordinate),
            settings.stop_label_offset,
            settings.stop_label_font_size,
            name,
            "black",
            &settings.underlayer_color,
            settings.underlayer_width,
        );
    }

    doc.render()
}
