//! Demo series generation.
//!
//! Produces a year of plausible daily activity: a per-metric baseline that
//! compounds monthly, day-to-day jitter around it and occasional spikes or
//! dips on a single metric.

use chrono::{Datelike, Days, NaiveDate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use partnerdash_common::{Sample, Series};

/// Length of the generated history, in days before `today`.
pub const HISTORY_DAYS: u64 = 365;

/// Chance that a given day carries a spike on one metric.
pub const SPIKE_PROBABILITY: f64 = 0.05;

/// Chance that a spike is upward (`SPIKE_UP`) rather than a dip (`SPIKE_DOWN`).
pub const SPIKE_UP_PROBABILITY: f64 = 0.7;
pub const SPIKE_UP: f64 = 1.2;
pub const SPIKE_DOWN: f64 = 0.85;

/// Width of the random addition to each metric's monthly growth factor.
pub const GROWTH_JITTER: f64 = 0.02;

/// Shape of one generated metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricProfile {
    pub name: &'static str,
    /// Starting baseline.
    pub base: f64,
    /// Lower bound of the monthly growth factor.
    pub monthly_growth: f64,
    /// Daily jitter spread; values vary by `(u - 0.5) * spread`.
    pub spread: f64,
}

/// Metrics produced by the generator, in output order.
pub const METRIC_PROFILES: &[MetricProfile] = &[
    MetricProfile { name: "partners", base: 450.0, monthly_growth: 1.04, spread: 0.10 },
    MetricProfile { name: "users", base: 500.0, monthly_growth: 1.05, spread: 0.15 },
    MetricProfile { name: "collections", base: 550.0, monthly_growth: 1.045, spread: 0.12 },
    MetricProfile { name: "activations", base: 600.0, monthly_growth: 1.055, spread: 0.13 },
    MetricProfile { name: "scans", base: 650.0, monthly_growth: 1.05, spread: 0.14 },
    MetricProfile { name: "likes", base: 700.0, monthly_growth: 1.06, spread: 0.16 },
    MetricProfile { name: "views", base: 750.0, monthly_growth: 1.065, spread: 0.11 },
];

/// Names of the generated metrics.
pub fn metric_names() -> Vec<String> {
    METRIC_PROFILES.iter().map(|p| p.name.to_string()).collect()
}

/// Generate a daily series covering `today - 365 days ..= today`.
///
/// Baselines compound on the first day of each month and are rounded after
/// each step. A spike multiplies an already jittered value.
pub fn generate_series<R: Rng>(today: NaiveDate, rng: &mut R) -> Series {
    let start = today
        .checked_sub_days(Days::new(HISTORY_DAYS))
        .unwrap_or(today);

    let growth: Vec<f64> = METRIC_PROFILES
        .iter()
        .map(|p| p.monthly_growth + rng.random_range(0.0..GROWTH_JITTER))
        .collect();
    let mut baseline: Vec<f64> = METRIC_PROFILES.iter().map(|p| p.base).collect();

    let mut samples = Vec::with_capacity(HISTORY_DAYS as usize + 1);
    let mut day = start;
    while day <= today {
        if day.day() == 1 {
            for (value, factor) in baseline.iter_mut().zip(&growth) {
                *value = (*value * factor).round();
            }
        }

        let mut values: Vec<f64> = METRIC_PROFILES
            .iter()
            .zip(&baseline)
            .map(|(profile, base)| {
                let jitter = (rng.random::<f64>() - 0.5) * profile.spread;
                (base * (1.0 + jitter)).round()
            })
            .collect();

        if rng.random::<f64>() < SPIKE_PROBABILITY {
            let idx = rng.random_range(0..values.len());
            let multiplier = if rng.random::<f64>() < SPIKE_UP_PROBABILITY {
                SPIKE_UP
            } else {
                SPIKE_DOWN
            };
            values[idx] = (values[idx] * multiplier).round();
        }

        let sample = METRIC_PROFILES
            .iter()
            .zip(values)
            .fold(Sample::new(day), |sample, (profile, value)| {
                sample.with_value(profile.name, value.max(0.0) as u64)
            });
        samples.push(sample);

        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    match Series::new(samples) {
        Ok(series) => series,
        Err(e) => {
            debug_assert!(false, "generated series is invalid: {e}");
            tracing::error!(error = %e, "Generated series failed validation");
            Series::empty()
        }
    }
}

/// Stateful demo generator backed by a non-reproducible RNG.
pub struct DemoGenerator {
    rng: SmallRng,
}

impl DemoGenerator {
    /// Create a generator seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Create a generator with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generate a fresh series ending on `today`.
    pub fn series(&mut self, today: NaiveDate) -> Series {
        generate_series(today, &mut self.rng)
    }

    /// Uniform integer in `range`, for fixture counters.
    pub fn count(&mut self, range: std::ops::Range<u64>) -> u64 {
        self.rng.random_range(range)
    }
}

impl Default for DemoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    #[test]
    fn test_generates_a_full_year() {
        let series = DemoGenerator::with_seed(7).series(today());

        assert_eq!(series.len(), 366);
        assert_eq!(series.first_day(), Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
        assert_eq!(series.last_day(), Some(today()));
        assert_eq!(series.metric_names().len(), METRIC_PROFILES.len());
    }

    #[test]
    fn test_generates_up_to_the_last_calendar_day() {
        let last = NaiveDate::MAX;
        let series = DemoGenerator::with_seed(3).series(last);

        assert_eq!(series.len(), 366);
        assert_eq!(series.last_day(), Some(last));
        assert!(!series.is_empty());
    }

    #[test]
    fn test_values_stay_near_baseline() {
        let mut generator = DemoGenerator::with_seed(42);
        for _ in 0..5 {
            let series = generator.series(today());
            for profile in METRIC_PROFILES {
                // 13 month starts at most, jitter and a spike on top
                let growth = (profile.monthly_growth + GROWTH_JITTER).powi(13);
                let ceiling = profile.base * growth * (1.0 + profile.spread / 2.0) * SPIKE_UP + 2.0;
                let floor = profile.base * (1.0 - profile.spread / 2.0) * SPIKE_DOWN - 2.0;

                for sample in series.samples() {
                    let value = sample.value(profile.name).unwrap() as f64;
                    assert!(value <= ceiling, "{} too high: {value}", profile.name);
                    assert!(value >= floor, "{} too low: {value}", profile.name);
                }
            }
        }
    }

    #[test]
    fn test_trend_grows_over_the_year() {
        let series = DemoGenerator::with_seed(3).series(today());
        let samples = series.samples();

        let mean = |range: std::ops::Range<usize>, metric: &str| {
            let n = range.len() as f64;
            samples[range]
                .iter()
                .map(|s| s.value(metric).unwrap() as f64)
                .sum::<f64>()
                / n
        };

        for profile in METRIC_PROFILES {
            assert!(mean(336..366, profile.name) > mean(0..30, profile.name));
        }
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = DemoGenerator::with_seed(11).series(today());
        let b = DemoGenerator::with_seed(11).series(today());
        assert_eq!(a, b);
    }

    #[test]
    fn test_os_seeded_generator_produces_valid_series() {
        let series = DemoGenerator::new().series(today());
        assert!(Series::new(series.samples().to_vec()).is_ok());
    }

    #[test]
    fn test_leap_day_is_covered() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let series = DemoGenerator::with_seed(1).series(today);
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert!(series.samples().iter().any(|s| s.timestamp == leap));
        assert_eq!(series.len(), 366);
    }
}
