//! Song time formatting
//!
//! Turns raw media element seconds into the zero-padded hour/minute/second
//! strings shown by time displays, and the completion percentage used by
//! song sliders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-padded time components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedTime {
    /// Hours, at least two digits
    pub hours: String,

    /// Minutes within the hour, two digits
    pub minutes: String,

    /// Seconds within the minute, two digits
    pub seconds: String,
}

impl fmt::Display for FormattedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

/// Time information for one media `timeupdate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeUpdate {
    /// Elapsed time
    pub current: FormattedTime,

    /// Song duration
    pub duration: FormattedTime,

    /// Completion (0-100); `None` for live streams
    pub percentage: Option<f64>,
}

/// Split seconds into zero-padded hours, minutes and seconds
///
/// Works on whole seconds. Negative, NaN and infinite input (e.g. the
/// duration of a stream that has not loaded yet) formats as zero.
pub fn format_time(seconds: f64) -> FormattedTime {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let total_minutes = whole / 60;

    FormattedTime {
        hours: format!("{:02}", total_minutes / 60),
        minutes: format!("{:02}", total_minutes % 60),
        seconds: format!("{:02}", whole % 60),
    }
}

/// Percentage of the song that has played
///
/// Returns 0 when the duration is zero, negative or unknown.
pub fn completion_percentage(current: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !current.is_finite() {
        return 0.0;
    }

    (current / duration * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(time: &FormattedTime) -> (&str, &str, &str) {
        (&time.hours, &time.minutes, &time.seconds)
    }

    #[test]
    fn format_minutes_and_seconds() {
        assert_eq!(parts(&format_time(125.0)), ("00", "02", "05"));
    }

    #[test]
    fn format_with_hours() {
        assert_eq!(parts(&format_time(3725.0)), ("01", "02", "05"));
    }

    #[test]
    fn format_exactly_one_hour() {
        assert_eq!(parts(&format_time(3600.0)), ("01", "00", "00"));
    }

    #[test]
    fn format_just_under_an_hour() {
        assert_eq!(parts(&format_time(3599.9)), ("00", "59", "59"));
    }

    #[test]
    fn format_drops_fractional_seconds() {
        assert_eq!(parts(&format_time(9.99)), ("00", "00", "09"));
    }

    #[test]
    fn format_invalid_input_as_zero() {
        for value in [-4.0, f64::NAN, f64::INFINITY] {
            assert_eq!(parts(&format_time(value)), ("00", "00", "00"));
        }
    }

    #[test]
    fn display_joins_components() {
        assert_eq!(format_time(3725.0).to_string(), "01:02:05");
    }

    #[test]
    fn percentage() {
        assert_eq!(completion_percentage(30.0, 120.0), 25.0);
        assert_eq!(completion_percentage(120.0, 120.0), 100.0);
    }

    #[test]
    fn percentage_guards_zero_duration() {
        assert_eq!(completion_percentage(5.0, 0.0), 0.0);
        assert_eq!(completion_percentage(5.0, f64::NAN), 0.0);
        assert_eq!(completion_percentage(5.0, f64::INFINITY), 0.0);
    }
}
