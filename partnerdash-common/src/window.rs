//! Trailing-window selection over a [`Series`](crate::series::Series).
//!
//! Windowing is a pure projection: it never mutates the source samples and
//! can be recomputed on every selection change.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::series::Sample;

/// Trailing range shown on a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "7days")]
    SevenDays,
    #[serde(rename = "2weeks")]
    TwoWeeks,
    /// Four weeks (default).
    #[default]
    #[serde(rename = "4weeks")]
    FourWeeks,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "1year")]
    OneYear,
}

impl DateRange {
    /// All ranges, shortest first.
    pub const ALL: &'static [DateRange] = &[
        DateRange::SevenDays,
        DateRange::TwoWeeks,
        DateRange::FourWeeks,
        DateRange::ThreeMonths,
        DateRange::OneYear,
    ];

    /// Short button label.
    pub fn label(&self) -> &'static str {
        match self {
            DateRange::SevenDays => "7D",
            DateRange::TwoWeeks => "2W",
            DateRange::FourWeeks => "4W",
            DateRange::ThreeMonths => "3M",
            DateRange::OneYear => "1Y",
        }
    }

    /// Earliest day inside the window ending at `today`.
    ///
    /// Day ranges go back a fixed number of days; month ranges go back whole
    /// calendar months, clamped to the end of shorter months.
    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        let cutoff = match self {
            DateRange::SevenDays => today.checked_sub_days(Days::new(7)),
            DateRange::TwoWeeks => today.checked_sub_days(Days::new(14)),
            DateRange::FourWeeks => today.checked_sub_days(Days::new(28)),
            DateRange::ThreeMonths => today.checked_sub_months(Months::new(3)),
            DateRange::OneYear => today.checked_sub_months(Months::new(12)),
        };
        cutoff.unwrap_or(NaiveDate::MIN)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Presentation mode of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl ChartKind {
    pub const ALL: &'static [ChartKind] = &[ChartKind::Line, ChartKind::Bar];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Bar => "Bar",
        }
    }
}

/// The three independent pieces of graph UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub range: DateRange,
    /// `None` means every metric offered by the container.
    pub metric: Option<String>,
    pub kind: ChartKind,
}

impl Selection {
    /// Selection starting on the given range.
    pub fn with_range(range: DateRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn set_range(&mut self, range: DateRange) {
        self.range = range;
    }

    pub fn set_metric(&mut self, metric: impl Into<String>) {
        self.metric = Some(metric.into());
    }

    pub fn clear_metric(&mut self) {
        self.metric = None;
    }

    pub fn set_kind(&mut self, kind: ChartKind) {
        self.kind = kind;
    }

    /// Metrics to project given the container's metric list.
    pub fn display_metrics(&self, metrics: &[String]) -> Vec<String> {
        match &self.metric {
            Some(metric) => vec![metric.clone()],
            None => metrics.to_vec(),
        }
    }

    /// Apply this selection to a list of samples.
    pub fn apply(&self, samples: &[Sample], metrics: &[String], today: NaiveDate) -> Window {
        window(samples, self.range, self.metric.as_deref(), metrics, today)
    }
}

/// The visible subset of a series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Window {
    /// Retained samples carrying only the projected metrics.
    pub samples: Vec<Sample>,
    /// Projected metric names, in display order.
    pub metrics: Vec<String>,
}

impl Window {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest projected value, if any.
    pub fn max_value(&self) -> Option<u64> {
        self.samples
            .iter()
            .flat_map(|s| s.values.values().copied())
            .max()
    }
}

/// Select samples newer than `today - range` and project the metric set.
///
/// With `metric_filter` set only that metric is kept; otherwise every name in
/// `metrics` is kept. Names a sample does not carry are skipped silently.
pub fn window(
    samples: &[Sample],
    range: DateRange,
    metric_filter: Option<&str>,
    metrics: &[String],
    today: NaiveDate,
) -> Window {
    let cutoff = range.cutoff(today);
    let projected: Vec<String> = match metric_filter {
        Some(metric) => vec![metric.to_string()],
        None => metrics.to_vec(),
    };

    let samples = samples
        .iter()
        .filter(|s| s.timestamp >= cutoff)
        .map(|s| Sample {
            timestamp: s.timestamp,
            values: projected
                .iter()
                .filter_map(|m| s.values.get(m).map(|v| (m.clone(), *v)))
                .collect(),
        })
        .collect();

    Window {
        samples,
        metrics: projected,
    }
}
