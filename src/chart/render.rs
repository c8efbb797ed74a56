//! Rendering adapter. The pipeline produces one [`ChartFrame`]; only the final
//! draw calls vary per toolkit.

use super::geometry::svg_path_data;
use super::pipeline::ChartFrame;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Number of grid intervals between the top and bottom edge.
pub const GRID_INTERVALS: usize = 3;

/// A drawing surface the chart can be replayed onto.
pub trait RenderBackend {
    fn begin_frame(&mut self, width: f64, height: f64, clear_color: &str);
    fn draw_polyline(&mut self, points: &[(f64, f64)], color: &str, width: f32);
    /// Independent `(x0, y0, x1, y1)` line segments.
    fn draw_segments(&mut self, segments: &[(f64, f64, f64, f64)], color: &str, width: f32);
}

/// Colours and stroke widths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub background: String,
    pub grid: String,
    pub baseline: String,
    /// One per series; wraps around when there are more series than colours.
    pub series: Vec<String>,
    pub line_width: f32,
    pub grid_width: f32,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            grid: "#f3f6fa".to_string(),
            baseline: "#e6edf8".to_string(),
            series: vec!["#3b82f6".to_string(), "#ef4444".to_string()],
            line_width: 2.0,
            grid_width: 1.0,
        }
    }
}

impl ChartTheme {
    pub fn series_color(&self, index: usize) -> &str {
        if self.series.is_empty() {
            return "#000000";
        }
        &self.series[index % self.series.len()]
    }
}

impl ChartFrame {
    /// Replay this frame onto `backend`: background, grid, baseline, then one
    /// polyline per series.
    pub fn render<B: RenderBackend + ?Sized>(&self, backend: &mut B, theme: &ChartTheme) {
        let width = self.viewport.width;
        let height = self.viewport.height;
        backend.begin_frame(width, height, &theme.background);

        let grid: Vec<(f64, f64, f64, f64)> = (0..=GRID_INTERVALS)
            .map(|i| {
                let y = height * i as f64 / GRID_INTERVALS as f64;
                (0.0, y, width, y)
            })
            .collect();
        backend.draw_segments(&grid, &theme.grid, theme.grid_width);
        backend.draw_segments(
            &[(0.0, self.baseline_y, width, self.baseline_y)],
            &theme.baseline,
            theme.grid_width,
        );

        for (i, s) in self.series.iter().enumerate() {
            backend.draw_polyline(&s.path.vertices, theme.series_color(i), theme.line_width);
        }
    }

    /// Render to a standalone SVG document.
    pub fn to_svg(&self, theme: &ChartTheme) -> String {
        let mut svg = SvgBackend::new();
        self.render(&mut svg, theme);
        svg.finish()
    }
}

/// Builds an SVG document in memory.
#[derive(Debug, Default)]
pub struct SvgBackend {
    header: String,
    body: String,
}

impl SvgBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the document and return it.
    pub fn finish(self) -> String {
        format!("{}{}</svg>", self.header, self.body)
    }
}

impl RenderBackend for SvgBackend {
    fn begin_frame(&mut self, width: f64, height: f64, clear_color: &str) {
        self.body.clear();
        self.header = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );
        let _ = write!(
            self.body,
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            width, height, clear_color
        );
    }

    fn draw_polyline(&mut self, points: &[(f64, f64)], color: &str, width: f32) {
        if points.is_empty() {
            return;
        }
        let _ = write!(
            self.body,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
            svg_path_data(points),
            color,
            width
        );
    }

    fn draw_segments(&mut self, segments: &[(f64, f64, f64, f64)], color: &str, width: f32) {
        for (x0, y0, x1, y1) in segments {
            let _ = write!(
                self.body,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                x0, y0, x1, y1, color, width
            );
        }
    }
}
