//! Daily multi-metric time series.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Field holding the sample date in loosely typed records.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// One day of metric counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Day this sample covers.
    pub timestamp: NaiveDate,

    /// Metric name -> count.
    #[serde(flatten)]
    pub values: BTreeMap<String, u64>,
}

impl Sample {
    /// Create a sample with no metric values.
    pub fn new(timestamp: NaiveDate) -> Self {
        Self {
            timestamp,
            values: BTreeMap::new(),
        }
    }

    /// Add a metric value.
    pub fn with_value(mut self, metric: impl Into<String>, value: u64) -> Self {
        self.values.insert(metric.into(), value);
        self
    }

    /// Look up a metric value.
    pub fn value(&self, metric: &str) -> Option<u64> {
        self.values.get(metric).copied()
    }

    /// Build a sample from a JSON object, rejecting malformed fields.
    pub fn from_record(record: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let raw = record
            .get(TIMESTAMP_FIELD)
            .ok_or_else(|| Error::InvalidSample("missing timestamp".to_string()))?;
        let raw = raw
            .as_str()
            .ok_or_else(|| Error::InvalidSample(format!("timestamp is not a string: {}", raw)))?;
        let timestamp = parse_day(raw)?;

        let mut sample = Sample::new(timestamp);
        for (name, value) in record {
            if name == TIMESTAMP_FIELD {
                continue;
            }
            let count = value.as_u64().ok_or_else(|| {
                Error::InvalidSample(format!(
                    "{}: metric '{}' is not a non-negative integer: {}",
                    raw, name, value
                ))
            })?;
            sample.values.insert(name.clone(), count);
        }

        Ok(sample)
    }
}

/// Parse a day from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_day(raw: &str) -> Result<NaiveDate> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|e| Error::InvalidSample(format!("malformed timestamp '{}': {}", raw, e)))
}

/// An ordered, gap-free daily series.
///
/// Every sample carries the same metric names and consecutive samples are
/// exactly one day apart. Construction rejects anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    /// Validate and wrap a list of samples.
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        if let Some(first) = samples.first() {
            for pair in samples.windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                if prev.timestamp.checked_add_days(Days::new(1)) != Some(next.timestamp) {
                    return Err(Error::InvalidSeries(format!(
                        "samples {} and {} are not one day apart",
                        prev.timestamp, next.timestamp
                    )));
                }
            }

            for sample in &samples[1..] {
                if !sample.values.keys().eq(first.values.keys()) {
                    return Err(Error::InvalidSeries(format!(
                        "sample {} has a different metric set than {}",
                        sample.timestamp, first.timestamp
                    )));
                }
            }
        }

        Ok(Self { samples })
    }

    /// An empty series.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from loosely typed records (e.g. rows from a remote fetch).
    ///
    /// Records are sorted by day before validation.
    pub fn from_records(records: &[serde_json::Map<String, serde_json::Value>]) -> Result<Self> {
        let mut samples = records
            .iter()
            .map(Sample::from_record)
            .collect::<Result<Vec<_>>>()?;
        samples.sort_by_key(|s| s.timestamp);
        Self::new(samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.samples.first().map(|s| s.timestamp)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.samples.last().map(|s| s.timestamp)
    }

    /// Metric names carried by every sample.
    pub fn metric_names(&self) -> Vec<String> {
        self.samples
            .first()
            .map(|s| s.values.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

impl<'de> Deserialize<'de> for Series {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let samples = Vec::<Sample>::deserialize(deserializer)?;
        Series::new(samples).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ab(ts: NaiveDate) -> Sample {
        Sample::new(ts).with_value("a", 10).with_value("b", 20)
    }

    fn record(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_contiguous_series_accepted() {
        let series = Series::new(vec![
            ab(day(2025, 2, 28)),
            ab(day(2025, 3, 1)),
            ab(day(2025, 3, 2)),
        ])
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.first_day(), Some(day(2025, 2, 28)));
        assert_eq!(series.last_day(), Some(day(2025, 3, 2)));
        assert_eq!(series.metric_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_gap_rejected() {
        let result = Series::new(vec![ab(day(2025, 3, 1)), ab(day(2025, 3, 3))]);
        assert!(matches!(result, Err(Error::InvalidSeries(_))));
    }

    #[test]
    fn test_duplicate_day_rejected() {
        let result = Series::new(vec![ab(day(2025, 3, 1)), ab(day(2025, 3, 1))]);
        assert!(result.is_err());
    }

    #[test]
    fn test_mismatched_metrics_rejected() {
        let result = Series::new(vec![
            ab(day(2025, 3, 1)),
            Sample::new(day(2025, 3, 2)).with_value("a", 1),
        ]);
        assert!(matches!(result, Err(Error::InvalidSeries(_))));
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = Series::new(Vec::new()).unwrap();
        assert!(series.is_empty());
        assert!(series.metric_names().is_empty());
    }

    #[test]
    fn test_from_records_sorts_and_parses() {
        let records = vec![
            record(json!({"timestamp": "2025-03-02T08:30:00Z", "users": 5, "scans": 7})),
            record(json!({"timestamp": "2025-03-01", "users": 4, "scans": 6})),
        ];

        let series = Series::from_records(&records).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.samples()[0].timestamp, day(2025, 3, 1));
        assert_eq!(series.samples()[1].value("scans"), Some(7));
    }

    #[test]
    fn test_malformed_timestamp_rejected() {
        let records = vec![record(json!({"timestamp": "03/01/2025", "users": 4}))];
        assert!(matches!(
            Series::from_records(&records),
            Err(Error::InvalidSample(_))
        ));
    }

    #[test]
    fn test_negative_value_rejected() {
        let records = vec![record(json!({"timestamp": "2025-03-01", "users": -4}))];
        assert!(Series::from_records(&records).is_err());

        let records = vec![record(json!({"timestamp": "2025-03-01", "users": 1.5}))];
        assert!(Series::from_records(&records).is_err());
    }

    #[test]
    fn test_json_shape() {
        let series = Series::new(vec![ab(day(2025, 3, 1))]).unwrap();
        let value = serde_json::to_value(&series).unwrap();
        assert_eq!(value, json!([{"timestamp": "2025-03-01", "a": 10, "b": 20}]));

        let back: Series = serde_json::from_value(value).unwrap();
        assert_eq!(back, series);
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        let value = json!([
            {"timestamp": "2025-03-01", "a": 1},
            {"timestamp": "2025-03-05", "a": 2},
        ]);
        assert!(serde_json::from_value::<Series>(value).is_err());
    }
}
