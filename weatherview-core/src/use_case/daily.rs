use async_trait::async_trait;
use chrono::{Datelike, Weekday};
use std::sync::Arc;

use crate::{
    clock::Clock,
    error::InvalidInputError,
    forecast::{self, AlignedWeek},
    format,
    provider::WeatherProvider,
    recent::CityRecencyReader,
};

use super::{WEATHER_DATA_UNAVAILABLE, resolve_city};

#[derive(Debug, Clone, Default)]
pub struct DailyInputData {
    /// Weekday name such as "Monday" or "mon". `None` selects today.
    pub weekday: Option<String>,
}

impl DailyInputData {
    pub fn weekday(weekday: impl Into<String>) -> Self {
        Self { weekday: Some(weekday.into()) }
    }
}

/// Seven-day overview plus the details of the selected day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyOutputData {
    pub city: String,
    /// Today first.
    pub weekdays: Vec<String>,
    pub temperatures: Vec<String>,
    pub conditions: Vec<String>,
    pub selected_weekday: String,
    pub feels_like: String,
    pub uv_index: String,
    pub wind_speed: String,
    pub cloud_cover: String,
    pub precipitation: String,
    pub humidity: String,
}

impl DailyOutputData {
    fn new(city: String, week: &AlignedWeek<'_>) -> Self {
        let selected = week.selected();
        let weekdays = week.weekdays.iter().map(|day| format::weekday(*day).to_string()).collect();
        let temperatures = week.days.iter().map(|day| format::celsius(day.temperature)).collect();
        let conditions = week.days.iter().map(|day| day.condition.clone()).collect();

        Self {
            city,
            weekdays,
            temperatures,
            conditions,
            selected_weekday: format::weekday(week.weekdays[week.selected_index]).to_string(),
            feels_like: format::celsius(selected.feels_like),
            uv_index: format::uv_index(selected.uv_index),
            wind_speed: format::meters_per_second(selected.wind_speed),
            cloud_cover: format::percent(selected.cloud_cover),
            precipitation: format::percent(selected.precipitation),
            humidity: format::percent(selected.humidity),
        }
    }
}

#[async_trait]
pub trait DailyInputBoundary: Send + Sync {
    async fn execute(&self, input: DailyInputData);

    /// Most recent city, today selected.
    async fn execute_default(&self) {
        self.execute(DailyInputData::default()).await;
    }

    fn switch_to_home_view(&self);
}

pub trait DailyOutputBoundary: Send + Sync {
    fn prepare_success_view(&self, output: DailyOutputData);
    fn prepare_fail_view(&self, message: String);
    fn switch_to_home_view(&self);
}

pub struct DailyInteractor {
    provider: Arc<dyn WeatherProvider>,
    recent: Arc<dyn CityRecencyReader>,
    clock: Arc<dyn Clock>,
    presenter: Arc<dyn DailyOutputBoundary>,
}

impl DailyInteractor {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        recent: Arc<dyn CityRecencyReader>,
        clock: Arc<dyn Clock>,
        presenter: Arc<dyn DailyOutputBoundary>,
    ) -> Self {
        Self { provider, recent, clock, presenter }
    }
}

fn parse_weekday(label: &str) -> Result<Weekday, InvalidInputError> {
    label.trim().parse().map_err(|_| InvalidInputError::UnknownWeekday(label.to_owned()))
}

#[async_trait]
impl DailyInputBoundary for DailyInteractor {
    async fn execute(&self, input: DailyInputData) {
        let requested = match input.weekday.as_deref().map(parse_weekday).transpose() {
            Ok(requested) => requested,
            Err(err) => {
                self.presenter.prepare_fail_view(err.to_string());
                return;
            }
        };

        let city = match resolve_city(None, self.recent.as_ref()) {
            Ok(city) => city,
            Err(err) => {
                self.presenter.prepare_fail_view(err.user_message());
                return;
            }
        };

        let daily = match self.provider.get_daily_weather(&city).await {
            Ok(daily) => daily,
            Err(err) => {
                tracing::warn!("Daily weather lookup failed: {err}");
                self.presenter.prepare_fail_view(WEATHER_DATA_UNAVAILABLE.to_string());
                return;
            }
        };

        let today = self.clock.now().with_timezone(&daily.timezone()).weekday();
        let week = forecast::align(&daily, requested.unwrap_or(today), today);

        self.presenter.prepare_success_view(DailyOutputData::new(city, &week));
    }

    fn switch_to_home_view(&self) {
        self.presenter.switch_to_home_view();
    }
}
