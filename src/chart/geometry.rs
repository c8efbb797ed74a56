//! Geometry mapper — values and positions to canvas pixels.

use super::{Domain, MappedPoint, Point};
use crate::shared::fmt::time::axis_label;
use crate::shared::Timestamp;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Default left/right inset of the plotted line.
pub const DEFAULT_HORIZONTAL_PADDING: f64 = 12.0;

pub const MIN_X_LABELS: usize = 2;
pub const MAX_X_LABELS: usize = 5;

/// Canvas dimensions in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub horizontal_padding: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, horizontal_padding: f64) -> Self {
        Self {
            width,
            height,
            horizontal_padding,
        }
    }

    /// Plot width between the insets, never negative.
    pub fn usable_width(&self) -> f64 {
        (self.width - self.horizontal_padding * 2.0).max(0.0)
    }

    /// X of the `index`-th of `count` evenly spaced points.
    pub fn x_for_index(&self, index: usize, count: usize) -> f64 {
        let denom = count.saturating_sub(1).max(1) as f64;
        self.horizontal_padding + self.usable_width() * (index as f64 / denom)
    }
}

/// Map a series onto the canvas.
///
/// X is the position in the sequence, Y the value through `domain`. Non-finite
/// values still get a vertex, on the Y of `domain.min`, so the path stays
/// continuous and indices stay aligned with the source series.
pub fn map_to_pixels(series: &[Point], domain: &Domain, viewport: &Viewport) -> Vec<MappedPoint> {
    let count = series.len();
    series
        .iter()
        .enumerate()
        .map(|(i, p)| MappedPoint {
            x: viewport.x_for_index(i, count),
            y: domain.value_to_y(p.value, viewport.height),
            value: p.value,
            time: p.time,
        })
        .collect()
}

/// Straight-segment path through mapped points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn to_svg_path(&self) -> String {
        svg_path_data(&self.vertices)
    }
}

/// SVG path data: `M x y L x y …`. Empty for no vertices.
pub fn svg_path_data(vertices: &[(f64, f64)]) -> String {
    let mut d = String::with_capacity(vertices.len() * 16);
    for (i, (x, y)) in vertices.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        let _ = write!(d, "{} {} {}", cmd, x, y);
    }
    d
}

impl From<&[MappedPoint]> for Polyline {
    fn from(points: &[MappedPoint]) -> Self {
        Self {
            vertices: points.iter().map(|p| (p.x, p.y)).collect(),
        }
    }
}

/// A labelled position on the X axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    /// Pixel X.
    pub position: f64,
    pub time: Timestamp,
    pub text: String,
}

/// Number of X labels for a series of `count` points (2 to 5).
pub fn x_label_count(count: usize) -> usize {
    if count == 0 {
        return MIN_X_LABELS;
    }
    let stride = count.div_ceil(4);
    count
        .div_ceil(stride)
        .clamp(MIN_X_LABELS, MAX_X_LABELS)
}

/// Evenly spaced X-axis labels. Series covering at most two days get `HH:MM`,
/// longer ones `DD.MM`.
pub fn x_axis_labels(series: &[Point], viewport: &Viewport, offset: FixedOffset) -> Vec<AxisLabel> {
    let count = series.len();
    if count == 0 {
        return Vec::new();
    }
    let span = series[count - 1].time - series[0].time;
    let n = x_label_count(count);
    (0..n)
        .map(|i| {
            let idx = ((i as f64 / (n - 1) as f64) * (count - 1) as f64).floor() as usize;
            let time = series[idx].time;
            AxisLabel {
                position: viewport.x_for_index(idx, count),
                time,
                text: axis_label(time, span, offset),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fmt::time::offset_from_minutes;
    use crate::shared::{DAY_MS, HOUR_MS};

    fn domain() -> Domain {
        Domain {
            min: 0.0,
            max: 100.0,
            baseline: 50.0,
        }
    }

    #[test]
    fn test_x_spacing_across_usable_width() {
        let vp = Viewport::new(224.0, 100.0, 12.0);
        let series: Vec<Point> = (0..5).map(|i| Point::new(i, 50.0)).collect();
        let mapped = map_to_pixels(&series, &domain(), &vp);
        let xs: Vec<f64> = mapped.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![12.0, 62.0, 112.0, 162.0, 212.0]);
        assert!(mapped.windows(2).all(|w| w[0].x <= w[1].x));
    }

    #[test]
    fn test_oversized_padding_collapses_instead_of_mirroring() {
        let vp = Viewport::new(20.0, 100.0, 12.0);
        assert_eq!(vp.usable_width(), 0.0);
        let series: Vec<Point> = (0..4).map(|i| Point::new(i, 50.0)).collect();
        let mapped = map_to_pixels(&series, &domain(), &vp);
        assert!(mapped.windows(2).all(|w| w[0].x <= w[1].x));
    }

    #[test]
    fn test_single_point_sits_on_left_padding() {
        let vp = Viewport::new(200.0, 100.0, 12.0);
        let mapped = map_to_pixels(&[Point::new(0, 75.0)], &domain(), &vp);
        assert_eq!(mapped[0].x, 12.0);
        assert_eq!(mapped[0].y, 25.0);
    }

    #[test]
    fn test_nan_keeps_vertex_at_domain_min() {
        let vp = Viewport::new(200.0, 80.0, 0.0);
        let series = vec![Point::new(0, 10.0), Point::new(1, f64::NAN), Point::new(2, 90.0)];
        let mapped = map_to_pixels(&series, &domain(), &vp);
        assert_eq!(mapped.len(), 3);
        assert_eq!(mapped[1].y, 80.0);
        assert!(mapped[1].value.is_nan());
        assert_eq!(Polyline::from(mapped.as_slice()).len(), 3);
    }

    #[test]
    fn test_svg_path() {
        let line = Polyline {
            vertices: vec![(0.0, 10.0), (5.5, 2.0), (11.0, 0.25)],
        };
        assert_eq!(line.to_svg_path(), "M 0 10 L 5.5 2 L 11 0.25");
        assert_eq!(Polyline::default().to_svg_path(), "");
    }

    #[test]
    fn test_x_label_count_bounds() {
        assert_eq!(x_label_count(1), 2);
        assert_eq!(x_label_count(3), 3);
        assert_eq!(x_label_count(5), 3);
        assert_eq!(x_label_count(8), 4);
        assert_eq!(x_label_count(180), 4);
        assert!((0..2000).all(|n| (2..=5).contains(&x_label_count(n))));
    }

    #[test]
    fn test_x_labels_intraday_use_clock_time() {
        let vp = Viewport::new(300.0, 100.0, 12.0);
        // 2024-03-05T00:00:00Z, hourly for a day
        let start = 1_709_596_800_000;
        let series: Vec<Point> = (0..25).map(|i| Point::new(start + i * HOUR_MS, 1.0)).collect();
        let labels = x_axis_labels(&series, &vp, offset_from_minutes(0));
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[0].text, "00:00");
        assert_eq!(labels[3].text, "00:00");
        assert_eq!(labels[0].position, 12.0);
        assert_eq!(labels[3].position, 288.0);
    }

    #[test]
    fn test_x_labels_multi_day_use_dates() {
        let vp = Viewport::new(300.0, 100.0, 12.0);
        let start = 1_709_596_800_000;
        let series: Vec<Point> = (0..8).map(|i| Point::new(start + i * DAY_MS, 1.0)).collect();
        let labels = x_axis_labels(&series, &vp, offset_from_minutes(0));
        assert_eq!(labels.first().map(|l| l.text.as_str()), Some("05.03"));
        assert_eq!(labels.last().map(|l| l.text.as_str()), Some("12.03"));
    }
}
