//! Integration tests for partnerdash-common library.

use chrono::{Days, NaiveDate};
use partnerdash_common::{
    ChartKind, DashboardConfig, DateRange, Sample, Selection, Series, metric_palette,
    parse_config, pastel_color, window,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A full year of samples for two metrics, ending on `today`.
fn year_series(today: NaiveDate) -> Series {
    let start = today - Days::new(365);
    let samples = (0..=365)
        .map(|i| {
            Sample::new(start + Days::new(i))
                .with_value("users", 500 + i)
                .with_value("scans", 650 + 2 * i)
        })
        .collect();
    Series::new(samples).expect("valid series")
}

#[test]
fn test_year_range_returns_whole_series() {
    let today = day(2025, 3, 5);
    let series = year_series(today);
    assert_eq!(series.len(), 366);

    let metrics = series.metric_names();
    let w = window(
        series.samples(),
        DateRange::OneYear,
        None,
        &metrics,
        today,
    );

    assert_eq!(w.samples.len(), 366);
    assert_eq!(w.samples, series.samples());
}

#[test]
fn test_every_range_stays_inside_cutoff() {
    let today = day(2024, 3, 31);
    let series = year_series(today);
    let metrics = series.metric_names();

    let mut previous = 0;
    for range in DateRange::ALL {
        let w = window(series.samples(), *range, None, &metrics, today);
        let cutoff = range.cutoff(today);

        assert!(w.samples.iter().all(|s| s.timestamp >= cutoff));
        assert!(w.samples.len() >= previous, "{range} shrank the window");
        previous = w.samples.len();
    }
}

#[test]
fn test_selection_changes_are_independent() {
    let today = day(2025, 3, 5);
    let series = year_series(today);
    let metrics = series.metric_names();

    let mut selection = Selection::with_range(DateRange::TwoWeeks);
    selection.set_kind(ChartKind::Bar);
    selection.set_metric("scans");
    let w = selection.apply(series.samples(), &metrics, today);
    assert_eq!(w.samples.len(), 15);
    assert!(w.samples.iter().all(|s| s.values.keys().map(String::as_str).eq(["scans"])));

    selection.set_range(DateRange::SevenDays);
    assert_eq!(selection.kind, ChartKind::Bar);
    assert_eq!(selection.metric.as_deref(), Some("scans"));
    assert_eq!(selection.apply(series.samples(), &metrics, today).samples.len(), 8);
}

#[test]
fn test_series_json_records_roundtrip_through_window() {
    let raw = r#"[
        {"timestamp": "2025-03-03T00:00:00.000Z", "users": 12, "likes": 3},
        {"timestamp": "2025-03-04T00:00:00.000Z", "users": 13, "likes": 4},
        {"timestamp": "2025-03-05T00:00:00.000Z", "users": 15, "likes": 2}
    ]"#;
    let records: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(raw).unwrap();
    let series = Series::from_records(&records).unwrap();

    let w = window(
        series.samples(),
        DateRange::SevenDays,
        Some("likes"),
        &series.metric_names(),
        day(2025, 3, 5),
    );
    let likes: Vec<u64> = w.samples.iter().filter_map(|s| s.value("likes")).collect();
    assert_eq!(likes, vec![3, 4, 2]);
}

#[test]
fn test_display_defaults_have_palette_colors() {
    let config: DashboardConfig = parse_config("{}").unwrap();
    let palette = metric_palette();

    for metric in config
        .display
        .overview_metrics
        .iter()
        .chain(&config.display.partner_metrics)
    {
        assert!(palette.contains_key(metric), "no color for {metric}");
    }
}

#[test]
fn test_pastel_colors_differ_between_partners() {
    let a = pastel_color("p11");
    let b = pastel_color("p12");
    assert_ne!(a, b);
    assert_eq!(pastel_color("p11"), a);
}
