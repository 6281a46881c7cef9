use super::TransformError;
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc, Weekday};

/// Calendar breakdown of a listening event's timestamp (UTC).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeRow {
    pub start_time: NaiveDateTime,
    pub hour: u32,
    pub day: u32,
    /// ISO 8601 week number.
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub weekday: &'static str,
}

impl TimeRow {
    pub fn from_epoch_millis(ts: i64) -> Result<Self, TransformError> {
        let start_time = DateTime::<Utc>::from_timestamp_millis(ts)
            .ok_or(TransformError::InvalidTimestamp(ts))?
            .naive_utc();
        Ok(Self {
            hour: start_time.hour(),
            day: start_time.day(),
            week: start_time.iso_week().week(),
            month: start_time.month(),
            year: start_time.year(),
            weekday: weekday_name(start_time.weekday()),
            start_time,
        })
    }

    pub fn start_time_text(&self) -> String {
        format_start_time(&self.start_time)
    }

    pub fn time_of_day_text(&self) -> String {
        self.start_time.format("%H:%M:%S%.3f").to_string()
    }
}

/// Canonical text form of an event instant, shared by the time and songplay
/// tables so the two join on equal strings.
pub fn format_start_time(start_time: &NaiveDateTime) -> String {
    start_time.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
