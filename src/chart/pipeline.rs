//! Full chart pipeline — raw samples in, renderable frame out.

use super::geometry::{x_axis_labels, AxisLabel, Polyline, Viewport, DEFAULT_HORIZONTAL_PADDING};
use super::interaction::nearest_index;
use super::normalize::{clamp_percent, normalize_indexed};
use super::resample::{resample_with_plan, upsample_linear, ResamplePlan};
use super::scale::{compute_domain, y_ticks, AxisTick};
use super::{map_to_pixels, ChartMode, Domain, MappedPoint, RawSample, Series};
use crate::error::ChartError;
use crate::shared::fmt::num::{format_percent, format_usd_compact};
use crate::shared::fmt::time::{format_short, offset_from_minutes};
use crate::shared::Timestamp;
use serde::{Deserialize, Serialize};

/// The pipeline plots one series or compares two.
pub const MAX_SERIES: usize = 2;

/// Every tuning knob of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub mode: ChartMode,
    /// Plot width in pixels (without the Y-axis label column).
    pub width: f64,
    pub height: f64,
    pub horizontal_padding: f64,
    /// Quantile clip for the Y domain, used when in `(0, 0.49)`.
    pub percentile_clip: Option<f64>,
    /// Percent mode only: clamp values into `[-c, c]` before resampling.
    pub percent_clamp: Option<f64>,
    /// Cap on the visible Y range (full range, not half).
    pub max_range: Option<f64>,
    /// Explicit point budget instead of the width-derived one (floored at 60).
    pub max_points_override: Option<usize>,
    /// Offset applied to axis and tooltip time labels.
    pub utc_offset_minutes: i32,
    /// Cut both series to their last `min(len_a, len_b)` samples before normalizing.
    pub trim_to_common_length: bool,
    pub y_tick_count: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            mode: ChartMode::Percent,
            width: 304.0,
            height: 420.0,
            horizontal_padding: DEFAULT_HORIZONTAL_PADDING,
            percentile_clip: Some(0.025),
            percent_clamp: Some(200.0),
            max_range: None,
            max_points_override: None,
            utc_offset_minutes: 0,
            trim_to_common_length: false,
            y_tick_count: 5,
        }
    }
}

impl ChartOptions {
    pub fn with_mode(mut self, mode: ChartMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_percentile_clip(mut self, clip: Option<f64>) -> Self {
        self.percentile_clip = clip;
        self
    }

    pub fn with_percent_clamp(mut self, clamp: Option<f64>) -> Self {
        self.percent_clamp = clamp;
        self
    }

    pub fn with_max_range(mut self, range: Option<f64>) -> Self {
        self.max_range = range;
        self
    }

    pub fn with_max_points(mut self, points: Option<usize>) -> Self {
        self.max_points_override = points;
        self
    }

    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    pub fn with_trim_to_common_length(mut self, trim: bool) -> Self {
        self.trim_to_common_length = trim;
        self
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.horizontal_padding)
    }

    fn validate(&self) -> Result<(), ChartError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !(ok(self.width) && ok(self.height)) {
            return Err(ChartError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        // Both insets must leave a positive plot width, or X would run backwards.
        let padding = self.horizontal_padding;
        if !padding.is_finite() || padding < 0.0 || padding * 2.0 >= self.width {
            return Err(ChartError::InvalidPadding {
                padding,
                width: self.width,
            });
        }
        Ok(())
    }
}

/// Geometry for one plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesGeometry {
    pub points: Vec<MappedPoint>,
    pub path: Polyline,
}

/// Point counts before and after resampling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartMeta {
    pub original_lengths: Vec<usize>,
    pub used_lengths: Vec<usize>,
    pub budget: usize,
    pub min_desired: usize,
}

/// Everything a rendering surface needs for one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub mode: ChartMode,
    pub viewport: Viewport,
    pub series: Vec<SeriesGeometry>,
    pub domain: Domain,
    pub x_labels: Vec<AxisLabel>,
    pub y_ticks: Vec<AxisTick>,
    /// Pixel Y of `domain.baseline`.
    pub baseline_y: f64,
    pub meta: ChartMeta,
    pub utc_offset_minutes: i32,
}

/// Values under the pointer, one per series, at a shared index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub time: Timestamp,
    pub values: Vec<f64>,
    /// `DD.MM HH:MM`.
    pub date_label: String,
    pub value_labels: Vec<String>,
}

impl ChartFrame {
    /// The longest mapped series; lookups run against it.
    fn reference(&self) -> Option<&SeriesGeometry> {
        self.series.iter().max_by_key(|s| s.points.len())
    }

    /// Nearest sample index for a pointer at `pixel_x`.
    pub fn nearest_index(&self, pixel_x: f64) -> Option<usize> {
        self.reference()
            .and_then(|s| nearest_index(&s.points, pixel_x))
    }

    /// Tooltip for a pointer at `pixel_x`: every series is read at the same index.
    pub fn tooltip_at(&self, pixel_x: f64) -> Option<Tooltip> {
        let index = self.nearest_index(pixel_x)?;
        let anchor = self.series.iter().find_map(|s| s.points.get(index))?;
        let values: Vec<f64> = self
            .series
            .iter()
            .map(|s| s.points.get(index).map_or(f64::NAN, |p| p.value))
            .collect();
        let value_labels = values.iter().map(|v| self.format_value(*v)).collect();
        Some(Tooltip {
            index,
            x: anchor.x,
            y: anchor.y,
            time: anchor.time,
            values,
            date_label: format_short(anchor.time, offset_from_minutes(self.utc_offset_minutes)),
            value_labels,
        })
    }

    pub fn format_value(&self, value: f64) -> String {
        match self.mode {
            ChartMode::Percent => format_percent(value, 2),
            ChartMode::Nominal => format_usd_compact(value),
        }
    }
}

/// What the UI should show for a chart slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    Ready(Box<ChartFrame>),
    /// Loading placeholder / "no data" message.
    InsufficientData,
}

impl ChartState {
    /// Insufficient-data errors become a placeholder; anything else is returned.
    pub fn from_result(result: Result<ChartFrame, ChartError>) -> Result<Self, ChartError> {
        match result {
            Ok(frame) => Ok(ChartState::Ready(Box::new(frame))),
            Err(e) if e.is_insufficient_data() => {
                tracing::debug!("Chart has insufficient data: {}", e);
                Ok(ChartState::InsufficientData)
            }
            Err(e) => Err(e),
        }
    }

    pub fn frame(&self) -> Option<&ChartFrame> {
        match self {
            ChartState::Ready(frame) => Some(frame.as_ref()),
            ChartState::InsufficientData => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ChartState::Ready(_))
    }
}

/// Plot a single series.
pub fn build_single_chart(raw: &[RawSample], options: &ChartOptions) -> Result<ChartFrame, ChartError> {
    build_chart(&[raw], options)
}

/// Plot two series on a shared Y axis.
pub fn build_compare_chart(
    a: &[RawSample],
    b: &[RawSample],
    options: &ChartOptions,
) -> Result<ChartFrame, ChartError> {
    build_chart(&[a, b], options)
}

/// Run the whole pipeline over one or two raw series.
///
/// All series come out with the same number of points, so index `i` refers
/// to the same position in each.
pub fn build_chart(raw: &[&[RawSample]], options: &ChartOptions) -> Result<ChartFrame, ChartError> {
    if raw.is_empty() || raw.len() > MAX_SERIES {
        return Err(ChartError::UnsupportedSeriesCount(raw.len()));
    }
    options.validate()?;
    if let Some(index) = raw.iter().position(|s| s.is_empty()) {
        return Err(ChartError::EmptySeries { index });
    }

    let common = raw.iter().map(|s| s.len()).min().unwrap_or(0);
    let inputs: Vec<&[RawSample]> = raw
        .iter()
        .map(|s| {
            if options.trim_to_common_length {
                &s[s.len() - common..]
            } else {
                *s
            }
        })
        .collect();

    let plan = ResamplePlan::new(options.width, options.max_points_override);
    let mut series: Vec<Series> = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        let mut normalized = normalize_indexed(input, options.mode, index)?;
        if options.mode == ChartMode::Percent {
            if let Some(limit) = options.percent_clamp {
                clamp_percent(&mut normalized, limit);
            }
        }
        series.push(resample_with_plan(&normalized, plan));
    }

    let target = series.iter().map(Vec::len).max().unwrap_or(0);
    for s in series.iter_mut() {
        if s.len() < target {
            *s = upsample_linear(s, target);
        }
    }

    let value_sets: Vec<Vec<f64>> = series
        .iter()
        .map(|s| s.iter().map(|p| p.value).collect())
        .collect();
    let value_refs: Vec<&[f64]> = value_sets.iter().map(Vec::as_slice).collect();
    let domain = compute_domain(
        &value_refs,
        options.mode,
        options.percentile_clip,
        options.max_range,
    );

    let viewport = options.viewport();
    let geometry: Vec<SeriesGeometry> = series
        .iter()
        .map(|s| {
            let points = map_to_pixels(s, &domain, &viewport);
            let path = Polyline::from(points.as_slice());
            SeriesGeometry { points, path }
        })
        .collect();

    let offset = offset_from_minutes(options.utc_offset_minutes);
    let meta = ChartMeta {
        original_lengths: raw.iter().map(|s| s.len()).collect(),
        used_lengths: series.iter().map(Vec::len).collect(),
        budget: plan.budget,
        min_desired: plan.min_desired,
    };
    tracing::debug!(
        original = ?meta.original_lengths,
        used = ?meta.used_lengths,
        budget = plan.budget,
        min = domain.min,
        max = domain.max,
        "Built chart frame"
    );

    Ok(ChartFrame {
        mode: options.mode,
        viewport,
        x_labels: x_axis_labels(&series[0], &viewport, offset),
        y_ticks: y_ticks(&domain, options.y_tick_count, options.height, options.mode),
        baseline_y: domain.value_to_y(domain.baseline, options.height),
        series: geometry,
        domain,
        meta,
        utc_offset_minutes: options.utc_offset_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::HOUR_MS;

    const START: i64 = 1_709_596_800_000;

    fn hourly(prices: &[f64]) -> Vec<RawSample> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| RawSample::new(START + i as i64 * HOUR_MS, *p))
            .collect()
    }

    fn wave(n: usize, base: f64) -> Vec<RawSample> {
        hourly(
            &(0..n)
                .map(|i| base + (i as f64 / 5.0).sin() * base * 0.1)
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_rejects_series_count() {
        let a = wave(10, 1.0);
        assert_eq!(
            build_chart(&[], &ChartOptions::default()),
            Err(ChartError::UnsupportedSeriesCount(0))
        );
        assert_eq!(
            build_chart(&[a.as_slice(), &a, &a], &ChartOptions::default()),
            Err(ChartError::UnsupportedSeriesCount(3))
        );
    }

    #[test]
    fn test_empty_series_reports_index() {
        let a = wave(10, 1.0);
        assert_eq!(
            build_compare_chart(&a, &[], &ChartOptions::default()),
            Err(ChartError::EmptySeries { index: 1 })
        );
    }

    #[test]
    fn test_invalid_dimensions() {
        let opts = ChartOptions::default().with_size(0.0, 200.0);
        assert!(matches!(
            build_single_chart(&wave(10, 1.0), &opts),
            Err(ChartError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_padding_must_fit_width() {
        let narrow = ChartOptions::default().with_size(20.0, 100.0);
        assert_eq!(
            build_single_chart(&wave(10, 1.0), &narrow),
            Err(ChartError::InvalidPadding {
                padding: DEFAULT_HORIZONTAL_PADDING,
                width: 20.0
            })
        );

        for padding in [-1.0, f64::NAN, 152.0] {
            let opts = ChartOptions {
                horizontal_padding: padding,
                ..ChartOptions::default()
            };
            assert!(matches!(
                build_single_chart(&wave(10, 1.0), &opts),
                Err(ChartError::InvalidPadding { .. })
            ));
        }
    }

    #[test]
    fn test_narrow_chart_x_increases_with_index() {
        let opts = ChartOptions::default().with_size(30.0, 100.0);
        let frame = build_single_chart(&wave(10, 1.0), &opts).unwrap();
        let points = &frame.series[0].points;
        assert!(points.windows(2).all(|w| w[0].x <= w[1].x));
        assert_eq!(points[0].x, DEFAULT_HORIZONTAL_PADDING);
        assert_eq!(frame.nearest_index(0.0), Some(0));
        assert_eq!(frame.nearest_index(30.0), Some(points.len() - 1));
    }

    #[test]
    fn test_compare_outputs_equal_lengths() {
        let opts = ChartOptions::default().with_size(360.0, 240.0);
        let frame = build_compare_chart(&wave(300, 100.0), &wave(40, 5.0), &opts).unwrap();
        assert_eq!(frame.series[0].points.len(), 300);
        assert_eq!(frame.series[1].points.len(), 300);
        assert_eq!(frame.meta.used_lengths, vec![300, 300]);
        assert_eq!(frame.meta.original_lengths, vec![300, 40]);
    }

    #[test]
    fn test_percent_series_start_at_baseline() {
        let opts = ChartOptions::default().with_size(360.0, 240.0);
        let frame = build_compare_chart(&wave(90, 100.0), &wave(30, 5.0), &opts).unwrap();
        for s in &frame.series {
            assert_eq!(s.points[0].value, 0.0);
            assert_eq!(s.points[0].y, frame.baseline_y);
        }
    }

    #[test]
    fn test_trim_to_common_length_uses_latest_samples() {
        let opts = ChartOptions::default()
            .with_mode(ChartMode::Nominal)
            .with_trim_to_common_length(true);
        let frame = build_compare_chart(&wave(50, 10.0), &wave(20, 10.0), &opts).unwrap();
        let first = frame.series[0].points[0].time;
        assert_eq!(first, START + 30 * HOUR_MS);
    }

    #[test]
    fn test_percent_clamp_applies_before_domain() {
        let opts = ChartOptions::default()
            .with_percentile_clip(None)
            .with_percent_clamp(Some(50.0));
        let frame = build_single_chart(&hourly(&[1.0, 5.0, 1.2]), &opts).unwrap();
        assert!(frame.domain.max <= 50.0 * 1.05 + 1e-9);
        assert!(frame
            .series[0]
            .points
            .iter()
            .all(|p| p.value <= 50.0));
    }

    #[test]
    fn test_tooltip_reads_all_series_at_same_index() {
        let opts = ChartOptions::default().with_size(360.0, 240.0);
        let frame = build_compare_chart(&wave(200, 100.0), &wave(200, 3.0), &opts).unwrap();
        let target = &frame.series[0].points[57];
        let tip = frame.tooltip_at(target.x + 0.1).unwrap();
        assert_eq!(tip.index, 57);
        assert_eq!(tip.values.len(), 2);
        assert_eq!(tip.values[0], frame.series[0].points[57].value);
        assert_eq!(tip.values[1], frame.series[1].points[57].value);
        assert_eq!(tip.time, target.time);
        assert!(tip.value_labels[0].ends_with('%'));
    }

    #[test]
    fn test_nominal_tooltip_formats_dollars() {
        let opts = ChartOptions::default().with_mode(ChartMode::Nominal);
        let frame = build_single_chart(&hourly(&[64_000.0, 65_000.0]), &opts).unwrap();
        let tip = frame.tooltip_at(0.0).unwrap();
        assert_eq!(tip.index, 0);
        assert_eq!(tip.value_labels, vec!["$64.00K".to_string()]);
        assert_eq!(tip.date_label, "05.03 00:00");
    }

    #[test]
    fn test_chart_state_from_result() {
        let empty = ChartState::from_result(Err(ChartError::EmptySeries { index: 0 })).unwrap();
        assert_eq!(empty, ChartState::InsufficientData);
        assert!(ChartState::from_result(Err(ChartError::UnsupportedSeriesCount(4))).is_err());

        let frame = build_single_chart(&wave(10, 1.0), &ChartOptions::default()).unwrap();
        let ready = ChartState::from_result(Ok(frame)).unwrap();
        assert!(ready.is_ready());
        assert!(ready.frame().is_some());
    }

    #[test]
    fn test_options_serde_defaults() {
        let opts: ChartOptions = serde_json::from_str(r#"{"mode":"nominal","width":500.0}"#).unwrap();
        assert_eq!(opts.mode, ChartMode::Nominal);
        assert_eq!(opts.width, 500.0);
        assert_eq!(opts.height, 420.0);
        assert_eq!(opts.percentile_clip, Some(0.025));
    }
}
