//! Wall clock face

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use serde::Serialize;

/// Formatted time and date as shown by the clock widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockFace {
    /// e.g. "9:05:03 PM"
    pub time: String,
    /// e.g. "Friday, October 16, 2026"
    pub date: String,
}

impl ClockFace {
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn at<Tz: TimeZone>(moment: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let hour = moment.hour();
        let meridiem = if hour >= 12 { "PM" } else { "AM" };
        let display_hour = match hour % 12 {
            0 => 12,
            h => h,
        };

        Self {
            time: format!(
                "{}:{:02}:{:02} {}",
                display_hour,
                moment.minute(),
                moment.second(),
                meridiem
            ),
            date: format!(
                "{}, {} {}, {}",
                moment.format("%A"),
                moment.format("%B"),
                moment.day(),
                moment.year()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn afternoon_uses_twelve_hour_clock() {
        let moment = Utc.with_ymd_and_hms(2026, 10, 16, 21, 5, 3).unwrap();
        let face = ClockFace::at(&moment);
        assert_eq!(face.time, "9:05:03 PM");
        assert_eq!(face.date, "Friday, October 16, 2026");
    }

    #[test]
    fn midnight_and_noon_show_twelve() {
        let midnight = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ClockFace::at(&midnight).time, "12:00:00 AM");
        let noon = Utc.with_ymd_and_hms(2026, 1, 1, 12, 30, 9).unwrap();
        assert_eq!(ClockFace::at(&noon).time, "12:30:09 PM");
        assert_eq!(ClockFace::at(&noon).date, "Thursday, January 1, 2026");
    }
}
