//! Time breakdown and prize frequency helpers.

use serde::{Deserialize, Serialize};

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3_600;
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// A duration split into calendar-ish units (365 day years, no months).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub years: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Break a number of seconds down into years, days, hours, minutes and seconds.
pub fn time_breakdown(total_seconds: u64) -> TimeBreakdown {
    let mut diff = total_seconds;

    let years = diff / SECONDS_PER_YEAR;
    diff -= years * SECONDS_PER_YEAR;

    let days = diff / SECONDS_PER_DAY;
    diff -= days * SECONDS_PER_DAY;

    let hours = diff / SECONDS_PER_HOUR;
    diff -= hours * SECONDS_PER_HOUR;

    let minutes = diff / SECONDS_PER_MINUTE;
    diff -= minutes * SECONDS_PER_MINUTE;

    TimeBreakdown { years, days, hours, minutes, seconds: diff }
}

/// Seconds left until a prize can be awarded. Negative once the period is over.
pub fn seconds_remaining_in_prize_period(
    prize_period_seconds: u64,
    prize_period_started_at: u64,
    now_seconds: u64,
) -> i64 {
    let elapsed = now_seconds as i64 - prize_period_started_at as i64;
    prize_period_seconds as i64 - elapsed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

/// How often something happens, expressed in the most readable unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatedFrequency {
    pub frequency: f64,
    pub unit: TimeUnit,
}

/// Convert an expected number of occurrences per day into "once every N units".
///
/// A daily count of 0 (never happens) yields a frequency of 0 days.
pub fn estimated_frequency(daily_count: f64) -> EstimatedFrequency {
    if !(daily_count > 0.0) {
        return EstimatedFrequency { frequency: 0.0, unit: TimeUnit::Day };
    }

    let days = 1.0 / daily_count;
    let weeks = days / 7.0;
    let months = days / (365.0 / 12.0);
    let years = days / 365.0;

    if weeks < 1.5 {
        EstimatedFrequency { frequency: days, unit: TimeUnit::Day }
    } else if months < 1.5 {
        EstimatedFrequency { frequency: weeks, unit: TimeUnit::Week }
    } else if years < 1.5 {
        EstimatedFrequency { frequency: months, unit: TimeUnit::Month }
    } else {
        EstimatedFrequency { frequency: years, unit: TimeUnit::Year }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_breakdown() {
        assert_eq!(
            time_breakdown(143_451_289),
            TimeBreakdown { years: 4, days: 200, hours: 7, minutes: 34, seconds: 49 }
        );
        assert_eq!(
            time_breakdown(1_434_512),
            TimeBreakdown { years: 0, days: 16, hours: 14, minutes: 28, seconds: 32 }
        );
        assert_eq!(
            time_breakdown(599),
            TimeBreakdown { years: 0, days: 0, hours: 0, minutes: 9, seconds: 59 }
        );
        assert_eq!(time_breakdown(44).seconds, 44);
    }

    #[test]
    fn test_estimated_frequency() {
        assert_eq!(
            estimated_frequency(1.0),
            EstimatedFrequency { frequency: 1.0, unit: TimeUnit::Day }
        );
        assert_eq!(
            estimated_frequency(0.2),
            EstimatedFrequency { frequency: 5.0, unit: TimeUnit::Day }
        );
        assert_eq!(
            estimated_frequency(0.05),
            EstimatedFrequency { frequency: 2.857142857142857, unit: TimeUnit::Week }
        );
        assert_eq!(
            estimated_frequency(0.01),
            EstimatedFrequency { frequency: 3.287671232876712, unit: TimeUnit::Month }
        );
        assert_eq!(
            estimated_frequency(0.0015),
            EstimatedFrequency { frequency: 1.82648401826484, unit: TimeUnit::Year }
        );
        assert_eq!(estimated_frequency(0.0).frequency, 0.0);
    }

    #[test]
    fn test_seconds_remaining() {
        assert_eq!(seconds_remaining_in_prize_period(604_800, 1_000, 101_000), 504_800);
        assert_eq!(seconds_remaining_in_prize_period(100, 0, 150), -50);
    }
}
