//! Domain calculator — shared Y range with quantile clipping and symmetric padding.

use super::{ChartMode, Domain};
use crate::shared::fmt::num::{format_axis_value, format_percent};
use serde::{Deserialize, Serialize};

/// Multiplier applied to the half-range so lines never touch the edges.
pub const DOMAIN_PADDING: f64 = 1.05;

/// Upper bound (exclusive) for a usable quantile clip.
pub const MAX_QUANTILE_CLIP: f64 = 0.49;

/// Compute the Y domain shared by every value set.
///
/// - Non-finite values are ignored; with nothing left the result is
///   [`Domain::FALLBACK`].
/// - `quantile_clip` in `(0, 0.49)` bounds the range to the `q` / `1 - q`
///   quantiles so single spikes do not flatten the rest of the chart.
/// - Baseline is `0` in percent mode and the median of the clipped values in
///   nominal mode; the result is symmetric around it.
/// - `max_range` caps the half-range at `max_range / 2` before padding.
pub fn compute_domain(
    value_sets: &[&[f64]],
    mode: ChartMode,
    quantile_clip: Option<f64>,
    max_range: Option<f64>,
) -> Domain {
    let mut values: Vec<f64> = value_sets
        .iter()
        .flat_map(|set| set.iter().copied())
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        return Domain::FALLBACK;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let mut lo = values[0];
    let mut hi = values[values.len() - 1];
    if let Some(q) = quantile_clip.filter(|q| *q > 0.0 && *q < MAX_QUANTILE_CLIP) {
        let low = quantile(&values, q);
        let high = quantile(&values, 1.0 - q);
        if low.is_finite() && high.is_finite() && high > low {
            lo = low;
            hi = high;
        }
    }

    let baseline = match mode {
        ChartMode::Percent => 0.0,
        ChartMode::Nominal => {
            let start = values.partition_point(|v| *v < lo);
            let end = values.partition_point(|v| *v <= hi);
            let kept = &values[start..end];
            if kept.is_empty() {
                median(&values)
            } else {
                median(kept)
            }
        }
    };

    let mut half = (baseline - lo).max(hi - baseline);
    if !half.is_finite() || half <= 0.0 {
        half = baseline.abs() * 0.05;
        if half == 0.0 {
            half = 1.0;
        }
    }

    if let Some(range) = max_range.filter(|r| r.is_finite() && *r > 0.0) {
        half = half.min(range / 2.0);
    }

    half *= DOMAIN_PADDING;
    Domain {
        min: baseline - half,
        max: baseline + half,
        baseline,
    }
}

/// Linear-interpolated quantile of an ascending slice. `NaN` when empty.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let idx = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = idx - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

/// Median of an ascending slice. `0` when empty.
pub fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let m = n / 2;
    if n % 2 == 1 {
        sorted[m]
    } else {
        (sorted[m - 1] + sorted[m]) / 2.0
    }
}

/// A labelled horizontal grid position on the Y axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    /// Pixel Y.
    pub position: f64,
    pub label: String,
}

/// `count` evenly spaced ticks from `domain.max` (top) down to `domain.min`.
pub fn y_ticks(domain: &Domain, count: usize, height: f64, mode: ChartMode) -> Vec<AxisTick> {
    let intervals = count.max(2) - 1;
    let step = domain.span() / intervals as f64;
    (0..=intervals)
        .rev()
        .map(|i| {
            let value = domain.min + step * i as f64;
            let label = match mode {
                ChartMode::Percent => format_percent(value, 1),
                ChartMode::Nominal => format_axis_value(value),
            };
            AxisTick {
                value,
                position: domain.value_to_y(value, height),
                label,
            }
        })
        .collect()
}
