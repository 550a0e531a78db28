//! SVG-backed drawing surface.
//!
//! Builds an SVG document as a string so charts can be rendered
//! headlessly. Text metrics are estimated from a fixed-width 12 px
//! font.

use crate::draw::surface::Surface;
use log::warn;

const CHAR_WIDTH: f64 = 7.0;
const LINE_HEIGHT: f64 = 14.0;
const FONT_SIZE: u32 = 12;
const DASH_PATTERN: &str = "4,3";

/// `Surface` implementation that accumulates SVG elements.
pub struct SvgSurface {
    width: u32,
    height: u32,
    body: String,
    offset: (f64, f64),
    saved_offsets: Vec<(f64, f64)>,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        SvgSurface {
            width,
            height,
            body: String::new(),
            offset: (0.0, 0.0),
            saved_offsets: Vec::new(),
        }
    }

    /// Finish the document and return the complete SVG markup.
    pub fn into_svg(self) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                "\n",
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" "#,
                r#"viewBox="0 0 {w} {h}" font-family="monospace" font-size="{fs}">"#,
                "\n{body}</svg>\n"
            ),
            w = self.width,
            h = self.height,
            fs = FONT_SIZE,
            body = self.body,
        )
    }

    fn tx(&self, x: f64) -> f64 {
        x + self.offset.0
    }

    fn ty(&self, y: f64) -> f64 {
        y + self.offset.1
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Surface for SvgSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, dashed: bool) {
        let dash = if dashed {
            format!(r#" stroke-dasharray="{}""#, DASH_PATTERN)
        } else {
            String::new()
        };
        self.body.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}"{}/>"#,
            self.tx(x1),
            self.ty(y1),
            self.tx(x2),
            self.ty(y2),
            color,
            dash
        ));
        self.body.push('\n');
    }

    fn rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<&str>,
        fill_opacity: f64,
        stroke: Option<&str>,
    ) {
        let mut attrs = String::new();
        match fill {
            Some(color) => {
                attrs.push_str(&format!(r#" fill="{}""#, color));
                if fill_opacity < 1.0 {
                    attrs.push_str(&format!(r#" fill-opacity="{:.2}""#, fill_opacity));
                }
            }
            None => attrs.push_str(r#" fill="none""#),
        }
        if let Some(color) = stroke {
            attrs.push_str(&format!(r#" stroke="{}""#, color));
        }
        self.body.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"{}/>"#,
            self.tx(x),
            self.ty(y),
            width,
            height,
            attrs
        ));
        self.body.push('\n');
    }

    fn polygon(&mut self, points: &[(f64, f64)], fill: &str, fill_opacity: f64) {
        if points.is_empty() {
            return;
        }
        self.body.push_str(&format!(
            r#"<polygon points="{}" fill="{}" fill-opacity="{:.2}"/>"#,
            self.point_list(points),
            fill,
            fill_opacity
        ));
        self.body.push('\n');
    }

    fn polyline(&mut self, points: &[(f64, f64)], color: &str) {
        if points.len() < 2 {
            return;
        }
        self.body.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
            self.point_list(points),
            color
        ));
        self.body.push('\n');
    }

    fn oval(&mut self, center_x: f64, center_y: f64, radius: f64, fill: &str) {
        self.body.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
            self.tx(center_x),
            self.ty(center_y),
            radius,
            fill
        ));
        self.body.push('\n');
    }

    fn text(&mut self, text: &str, x: f64, y: f64, color: &str) {
        if text.is_empty() {
            return;
        }
        self.body.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" fill="{}">{}</text>"#,
            self.tx(x),
            self.ty(y),
            color,
            escape(text)
        ));
        self.body.push('\n');
    }

    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * CHAR_WIDTH
    }

    fn line_height(&self) -> f64 {
        LINE_HEIGHT
    }

    fn push_offset(&mut self, dx: f64, dy: f64) {
        self.saved_offsets.push(self.offset);
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    fn pop_offset(&mut self) {
        match self.saved_offsets.pop() {
            Some(previous) => self.offset = previous,
            None => {
                warn!("Offset stack underflow, resetting origin");
                self.offset = (0.0, 0.0);
            }
        }
    }
}

impl SvgSurface {
    fn point_list(&self, points: &[(f64, f64)]) -> String {
        points
            .iter()
            .map(|(x, y)| format!("{:.2},{:.2}", self.tx(*x), self.ty(*y)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
