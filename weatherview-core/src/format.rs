//! Display strings with units appended, shared by every use case.

use chrono::{DateTime, TimeZone, Weekday};

pub fn celsius(value: f64) -> String {
    format!("{value:.1}°C")
}

pub fn meters_per_second(value: f64) -> String {
    format!("{value:.1} m/s")
}

pub fn percent(value: f64) -> String {
    format!("{value:.0}%")
}

pub fn uv_index(value: f64) -> String {
    format!("{value:.1}")
}

pub fn weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// e.g. "Friday, March 7"
pub fn long_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%A, %B %-d").to_string()
}

pub fn hour_of_day(hour: u32) -> String {
    format!("{:02}:00", hour % 24)
}
