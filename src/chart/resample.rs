//! Resampler — fit a series to the point budget of the target width.
//!
//! Over-dense series are stride-decimated: the point at `floor(i * step)` is kept
//! as-is, so plotted values are exact historical values, but extrema between
//! kept indices can be skipped. Sparse series are linearly interpolated up to a
//! minimum density so that two compared series end up with comparable counts.

use super::{Point, Series};

/// Target points per horizontal pixel.
pub const POINTS_PER_PIXEL: f64 = 1.2;
pub const MIN_BUDGET: usize = 240;
pub const MAX_BUDGET: usize = 1600;
/// Lower bound for both the upsample density and an explicit budget override.
pub const MIN_DENSITY: usize = 60;

/// Point counts derived from the target width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResamplePlan {
    /// Series longer than this are decimated down to it.
    pub budget: usize,
    /// Series shorter than this are interpolated up to it.
    pub min_desired: usize,
}

impl ResamplePlan {
    pub fn new(target_width_px: f64, override_budget: Option<usize>) -> Self {
        let budget = match override_budget {
            Some(n) => n.max(MIN_DENSITY),
            None => round_to_count(target_width_px * POINTS_PER_PIXEL).clamp(MIN_BUDGET, MAX_BUDGET),
        };
        let min_desired = budget.min(round_to_count(target_width_px / 2.0).max(MIN_DENSITY));
        Self {
            budget,
            min_desired,
        }
    }

    /// Number of points `resample` produces for a series of `len` points.
    pub fn output_len(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else if len > self.budget {
            self.budget
        } else {
            len.max(self.min_desired)
        }
    }
}

fn round_to_count(x: f64) -> usize {
    if x.is_finite() && x > 0.0 {
        x.round() as usize
    } else {
        0
    }
}

/// Resample `series` for a chart `target_width_px` wide.
///
/// Pure function: identical inputs always give identical output.
pub fn resample(series: &[Point], target_width_px: f64, override_budget: Option<usize>) -> Series {
    resample_with_plan(series, ResamplePlan::new(target_width_px, override_budget))
}

pub fn resample_with_plan(series: &[Point], plan: ResamplePlan) -> Series {
    let decimated = downsample(series, plan.budget);
    if decimated.len() < plan.min_desired {
        upsample_linear(&decimated, plan.min_desired)
    } else {
        decimated
    }
}

/// Keep `budget` points at evenly strided indices.
pub fn downsample(series: &[Point], budget: usize) -> Series {
    if series.len() <= budget {
        return series.to_vec();
    }
    let step = series.len() as f64 / budget as f64;
    let last = series.len() - 1;
    (0..budget)
        .map(|i| series[((i as f64 * step).floor() as usize).min(last)])
        .collect()
}

/// Interpolate `series` up to `target_count` points.
///
/// Positions are spread proportionally over `[0, len - 1]`; timestamps are
/// interpolated alongside values. When an interval touches a non-finite value
/// the nearer endpoint is taken, so gaps survive where they coincide with a
/// sample. A single point is replicated with timestamps 1 ms apart.
pub fn upsample_linear(series: &[Point], target_count: usize) -> Series {
    let n = series.len();
    if n >= target_count {
        return series.to_vec();
    }
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        let p = series[0];
        return (0..target_count)
            .map(|i| Point::new(p.time + i as i64, p.value))
            .collect();
    }

    let last = n - 1;
    let denom = (target_count - 1) as f64;
    (0..target_count)
        .map(|i| {
            let t = i as f64 / denom * last as f64;
            let lo = (t.floor() as usize).min(last);
            let hi = (lo + 1).min(last);
            let frac = t - lo as f64;
            interpolate(series[lo], series[hi], frac)
        })
        .collect()
}

fn interpolate(p0: Point, p1: Point, frac: f64) -> Point {
    let value = if p0.value.is_finite() && p1.value.is_finite() {
        p0.value * (1.0 - frac) + p1.value * frac
    } else if frac < 0.5 {
        p0.value
    } else {
        p1.value
    };
    let time = (p0.time as f64 * (1.0 - frac) + p1.time as f64 * frac).round() as i64;
    Point::new(time, value)
}
