//! Chart data pipeline — comparable price series for one or two assets.
//!
//! Every stage is a pure function over value types:
//!
//! ```text
//! RawSample[] ─ normalize ─▶ Series ─ resample ─▶ Series ─┐
//!                                                         ├─ compute_domain ─▶ Domain
//! RawSample[] ─ normalize ─▶ Series ─ resample ─▶ Series ─┘         │
//!                                                                   ▼
//!                     nearest_index ◀── MappedPoint[] ◀── map_to_pixels
//! ```
//!
//! [`build_chart`] runs the whole pipeline and returns a [`ChartFrame`]; the
//! individual stages are public for callers that need only part of it.

pub mod geometry;
pub mod interaction;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod resample;
pub mod scale;

use crate::shared::Timestamp;
use serde::{Deserialize, Serialize};

pub use geometry::{map_to_pixels, x_axis_labels, AxisLabel, Polyline, Viewport};
pub use interaction::nearest_index;
pub use normalize::normalize;
pub use pipeline::{
    build_chart, build_compare_chart, build_single_chart, ChartFrame, ChartMeta, ChartOptions,
    ChartState, SeriesGeometry, Tooltip,
};
pub use render::{ChartTheme, RenderBackend, SvgBackend};
pub use resample::{resample, ResamplePlan};
pub use scale::{compute_domain, y_ticks, AxisTick};

/// A single `(timestamp, price)` pair as delivered by the market-data API.
///
/// `timestamp` may be Unix seconds or milliseconds; `price` is `None` when the
/// API sent `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub timestamp: i64,
    pub price: Option<f64>,
}

impl RawSample {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self {
            timestamp,
            price: Some(price),
        }
    }

    pub fn missing(timestamp: i64) -> Self {
        Self {
            timestamp,
            price: None,
        }
    }
}

/// A point inside the pipeline. `value` is a price, a percent change, or `NaN`
/// for a missing sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unix timestamp in milliseconds.
    pub time: Timestamp,
    pub value: f64,
}

impl Point {
    pub fn new(time: Timestamp, value: f64) -> Self {
        Self { time, value }
    }
}

/// Points ordered by non-decreasing `time`.
pub type Series = Vec<Point>;

/// How values are expressed on the Y axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Change from each series' first value, in percent.
    #[default]
    Percent,
    /// Original currency units around a shared median.
    Nominal,
}

/// Y-axis value range. Always symmetric around `baseline`, with `max > min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
    pub baseline: f64,
}

impl Domain {
    /// Used when there is not a single finite value to plot.
    pub const FALLBACK: Domain = Domain {
        min: 0.0,
        max: 1.0,
        baseline: 0.5,
    };

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Linear map from `[min, max]` to `[height, 0]`, clamped to the canvas.
    /// Non-finite values land on the bottom edge.
    pub fn value_to_y(&self, value: f64, height: f64) -> f64 {
        let v = if value.is_finite() { value } else { self.min };
        let t = (v - self.min) / self.span();
        (height - t * height).clamp(0.0, height)
    }
}

/// A point positioned on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappedPoint {
    /// Pixel X, left to right.
    pub x: f64,
    /// Pixel Y, top to bottom.
    pub y: f64,
    /// Plotted value (may be `NaN`).
    pub value: f64,
    /// Timestamp of the (resampled) source point.
    pub time: Timestamp,
}
