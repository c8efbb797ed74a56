//! Number formatting utilities for human-readable display.
//!
//! Handles f64 values with automatic decimal-place detection, comma separators,
//! and the compact forms used on chart axes and tooltips.

/// Trims trailing zeros, adds thousands separators.
pub fn display_formatted_string(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

fn get_decimal_places(value: f64) -> usize {
    let abs_value = value.abs();

    if abs_value >= 100.0 {
        return 0;
    }
    if abs_value >= 1.0 || abs_value == 0.0 {
        return 2;
    }

    let exponent = abs_value.log10().floor().abs() as usize;
    (exponent + 2).min(8)
}

/// Format an f64 for display with auto-detected decimal places.
pub fn display(amount: f64) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }
    display_with_decimals(amount, get_decimal_places(amount))
}

/// Format an f64 for display with explicit decimal places.
pub fn display_with_decimals(amount: f64, decimals: usize) -> String {
    display_formatted_string(format!("{:.1$}", amount, decimals))
}

/// Percentage with a fixed number of decimals, e.g. `12.50%`.
pub fn format_percent(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format!("{:.1$}%", value, decimals)
}

/// Dollar amount with `K`/`M`/`B` suffixes, e.g. `$1.23M`.
pub fn format_usd_compact(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("${:.2}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("${:.2}K", value / 1_000.0)
    } else {
        format!("${:.2}", value)
    }
}

/// Nominal Y-axis label: whole units above 1000, cents above 1, four decimals below.
pub fn format_axis_value(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let abs = value.abs();
    if abs >= 1_000.0 {
        format!("{:.0}", value)
    } else if abs >= 1.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.4}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formatted_string_thousands_separator() {
        assert_eq!(display_formatted_string("0".to_string()), "0");
        assert_eq!(display_formatted_string("123".to_string()), "123");
        assert_eq!(display_formatted_string("1000".to_string()), "1,000");
        assert_eq!(display_formatted_string("123456".to_string()), "123,456");
        assert_eq!(display_formatted_string("1234567".to_string()), "1,234,567");
    }

    #[test]
    fn test_display_formatted_string_trims_and_keeps_sign() {
        assert_eq!(display_formatted_string("1.500".to_string()), "1.5");
        assert_eq!(display_formatted_string("1000.00".to_string()), "1,000");
        assert_eq!(display_formatted_string("-1234.56".to_string()), "-1,234.56");
        assert_eq!(display_formatted_string("-100".to_string()), "-100");
    }

    #[test]
    fn test_display_auto_decimals() {
        assert_eq!(display(64_250.4), "64,250");
        assert_eq!(display(1.5), "1.5");
        assert_eq!(display(15.456), "15.46");
        assert_eq!(display(0.0123), "0.0123");
        assert_eq!(display(0.0), "0");
        assert_eq!(display(f64::NAN), "-");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.5, 1), "12.5%");
        assert_eq!(format_percent(-3.256, 2), "-3.26%");
        assert_eq!(format_percent(f64::INFINITY, 2), "-");
    }

    #[test]
    fn test_format_usd_compact() {
        assert_eq!(format_usd_compact(12.3), "$12.30");
        assert_eq!(format_usd_compact(1_250.0), "$1.25K");
        assert_eq!(format_usd_compact(3_400_000.0), "$3.40M");
        assert_eq!(format_usd_compact(-2_000_000_000.0), "$-2.00B");
        assert_eq!(format_usd_compact(f64::NAN), "-");
    }

    #[test]
    fn test_format_axis_value() {
        assert_eq!(format_axis_value(64_250.4), "64250");
        assert_eq!(format_axis_value(-1_500.2), "-1500");
        assert_eq!(format_axis_value(2.5), "2.50");
        assert_eq!(format_axis_value(0.12346), "0.1235");
        assert_eq!(format_axis_value(f64::NAN), "");
    }
}
