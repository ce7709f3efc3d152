//! Minimal primitives-to-text SVG writer. Emits exactly the elements the
//! map renderer needs (polylines, circles, text labels) and nothing more.

use std::fmt::Write as _;

use super::Color;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Default)]
pub struct Document {
    elements: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_polyline(&mut self, points: &[Point], stroke: &Color, stroke_width: f64) {
        let mut element = String::from("<polyline points=\"");
        for point in points {
            let _ = write!(element, "{},{} ", point.x, point.y);
        }
        let _ = write!(
            element,
            "\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
            stroke.to_svg_string(),
            stroke_width
        );
        self.elements.push(element);
    }

    pub fn add_circle(&mut self, center: Point, radius: f64, fill: &str) {
        self.elements.push(format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
            center.x, center.y, radius, fill
        ));
    }

    /// Text with an underlayer copy drawn first for legibility, matching
    /// the two-pass (underlayer then fill) label convention.
    pub fn add_label(
        &mut self,
        position: Point,
        offset: (f64, f64),
        font_size: u32,
        text: &str,
        fill: &str,
        underlayer_color: &Color,
        underlayer_width: f64,
    ) {
        let x = position.x + offset.0;
        let y = position.y + offset.1;
        let escaped = escape(text);
        self.elements.push(format!(
            "<text x=\"{x}\" y=\"{y}\" font-size=\"{font_size}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\">{escaped}</text>",
            underlayer_color.to_svg_string(),
            underlayer_color.to_svg_string(),
            underlayer_width,
        ));
        self.elements.push(format!(
            "<text x=\"{x}\" y=\"{y}\" font-size=\"{font_size}\" fill=\"{fill}\">{escaped}</text>",
        ));
    }

    pub fn render(self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
        out.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n");
        for element in &self.elements {
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>");
        out
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
