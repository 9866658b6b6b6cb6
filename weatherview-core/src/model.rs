use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::AlignmentPrecondition;

/// Number of days in a daily forecast, and in a week.
pub const WEEK_SIZE: usize = 7;

/// A single weather reading. Temperatures in °C, wind in m/s, the rest in %
/// except `uv_index`, which is unitless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub uv_index: f64,
    pub wind_speed: f64,
    pub cloud_cover: f64,
    pub precipitation: f64,
    pub humidity: f64,
}

/// Hourly readings for one city, most recent hour first.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyWeatherSet {
    pub timezone: Tz,
    pub low_temperature: f64,
    pub high_temperature: f64,
    pub hours: Vec<WeatherSnapshot>,
}

impl HourlyWeatherSet {
    /// Reading for the current hour.
    pub fn current(&self) -> Option<&WeatherSnapshot> {
        self.hours.first()
    }
}

/// Seven consecutive days of readings starting with today in `timezone`.
///
/// Entries keep the provider's today-first order; they carry no weekday
/// labels of their own. See [`crate::forecast`] for labelling.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyWeatherSet {
    timezone: Tz,
    days: [WeatherSnapshot; WEEK_SIZE],
}

impl DailyWeatherSet {
    pub fn try_new(
        timezone: Tz,
        days: Vec<WeatherSnapshot>,
    ) -> Result<Self, AlignmentPrecondition> {
        let days: [WeatherSnapshot; WEEK_SIZE] = days
            .try_into()
            .map_err(|days: Vec<WeatherSnapshot>| AlignmentPrecondition::with_actual(days.len()))?;

        Ok(Self { timezone, days })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn days(&self) -> &[WeatherSnapshot; WEEK_SIZE] {
        &self.days
    }
}
