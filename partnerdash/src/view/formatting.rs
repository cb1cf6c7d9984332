//! Shared formatting utilities for the PartnerDash views.

use chrono::{DateTime, NaiveDate, Utc};

/// Format a numeric value for display with appropriate scale suffix.
///
/// - Values >= 1M display as "X.XM"
/// - Values >= 1K display as "X.XK"
/// - Integer values display without decimal places
/// - Other values display with 2 decimal places
pub fn format_value(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Format a count with thousands separators ("12,345").
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// X-axis tick label: abbreviated month and day ("Mar 5").
pub fn format_tick_label(day: NaiveDate) -> String {
    day.format("%b %-d").to_string()
}

/// Tooltip label: full month, day and year ("March 5, 2025").
pub fn format_tooltip_label(day: NaiveDate) -> String {
    day.format("%B %-d, %Y").to_string()
}

/// Creation date shown on records ("Mar 5, 2025").
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Upper-case the first character ("scans" -> "Scans").
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(3.14159), "3.14");
        assert_eq!(format_value(1500.0), "1.5K");
        assert_eq!(format_value(2500000.0), "2.5M");
        assert_eq!(format_value(-1500.0), "-1.5K");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_date_labels() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_tick_label(day), "Mar 5");
        assert_eq!(format_tooltip_label(day), "March 5, 2025");

        let at = day.and_hms_opt(12, 0, 0).unwrap().and_utc();
        assert_eq!(format_date(&at), "Mar 5, 2025");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("scans"), "Scans");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("Views"), "Views");
    }
}
