//! Timestamp formatting for axis labels and tooltips.

use crate::shared::{Timestamp, DAY_MS};
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Series spanning at most this long get time-of-day labels instead of dates.
pub const INTRADAY_SPAN_MS: i64 = 2 * DAY_MS;

/// Build a fixed offset from minutes east of UTC, falling back to UTC when out of range.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
}

fn localize(ts: Timestamp, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp_millis(ts).map(|dt| dt.with_timezone(&offset))
}

/// `HH:MM`.
pub fn format_hm(ts: Timestamp, offset: FixedOffset) -> String {
    localize(ts, offset)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// `DD.MM`.
pub fn format_day_month(ts: Timestamp, offset: FixedOffset) -> String {
    localize(ts, offset)
        .map(|dt| dt.format("%d.%m").to_string())
        .unwrap_or_default()
}

/// `DD.MM HH:MM`, used in tooltips.
pub fn format_short(ts: Timestamp, offset: FixedOffset) -> String {
    localize(ts, offset)
        .map(|dt| dt.format("%d.%m %H:%M").to_string())
        .unwrap_or_default()
}

/// X-axis label for `ts` given the total span of the plotted series.
pub fn axis_label(ts: Timestamp, span_ms: i64, offset: FixedOffset) -> String {
    if span_ms <= INTRADAY_SPAN_MS {
        format_hm(ts, offset)
    } else {
        format_day_month(ts, offset)
    }
}
