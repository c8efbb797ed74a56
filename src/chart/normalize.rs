//! Series normalizer — raw samples into typed points, optional percent transform.

use super::{ChartMode, Point, RawSample, Series};
use crate::error::ChartError;
use crate::shared::{Timestamp, SECOND_MS};

/// Timestamps with exactly this many decimal digits are Unix seconds.
const SECONDS_EPOCH_DIGITS: u32 = 10;

fn decimal_digits(n: i64) -> u32 {
    n.unsigned_abs().checked_ilog10().map_or(1, |d| d + 1)
}

/// Convert a raw timestamp to milliseconds.
pub fn normalize_timestamp(raw: i64) -> Timestamp {
    if decimal_digits(raw) == SECONDS_EPOCH_DIGITS {
        raw.saturating_mul(SECOND_MS)
    } else {
        raw
    }
}

/// Turn raw samples into a [`Series`].
///
/// Missing and non-finite prices become `NaN`. In [`ChartMode::Percent`] every
/// value is re-expressed relative to the first raw price, so the first point
/// is exactly `0`.
pub fn normalize(raw: &[RawSample], mode: ChartMode) -> Result<Series, ChartError> {
    normalize_indexed(raw, mode, 0)
}

pub(crate) fn normalize_indexed(
    raw: &[RawSample],
    mode: ChartMode,
    index: usize,
) -> Result<Series, ChartError> {
    if raw.is_empty() {
        return Err(ChartError::EmptySeries { index });
    }

    let points = raw.iter().map(|s| {
        let value = s.price.filter(|p| p.is_finite()).unwrap_or(f64::NAN);
        Point::new(normalize_timestamp(s.timestamp), value)
    });

    Ok(match mode {
        ChartMode::Nominal => points.collect(),
        ChartMode::Percent => {
            let base = raw[0].price.filter(|p| p.is_finite()).unwrap_or(1.0);
            points
                .map(|p| Point::new(p.time, percent_change(p.value, base)))
                .collect()
        }
    })
}

fn percent_change(value: f64, base: f64) -> f64 {
    if !value.is_finite() {
        return f64::NAN;
    }
    if base == 0.0 {
        return 0.0;
    }
    (value - base) / base * 100.0
}

/// Clamp finite values into `[-limit, limit]`. `NaN` stays `NaN`.
pub fn clamp_percent(series: &mut [Point], limit: f64) {
    if !limit.is_finite() || limit <= 0.0 {
        return;
    }
    for p in series.iter_mut() {
        if p.value.is_finite() {
            p.value = p.value.clamp(-limit, limit);
        }
    }
}
