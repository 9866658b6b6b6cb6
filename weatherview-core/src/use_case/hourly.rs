use async_trait::async_trait;
use chrono::{Duration, Timelike};
use std::sync::Arc;

use crate::{
    clock::Clock,
    error::InvalidInputError,
    format,
    provider::WeatherProvider,
    recent::CityRecencyReader,
};

use super::{WEATHER_DATA_UNAVAILABLE, resolve_city};

#[derive(Debug, Clone, Default)]
pub struct HourlyInputData {
    /// Falls back to the most recent city.
    pub city: Option<String>,
    /// Hours from now; `None` is the current hour.
    pub hour: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyOutputData {
    pub city: String,
    pub low_temperature: String,
    pub high_temperature: String,
    /// `HH:00` labels in the city's timezone, current hour first.
    pub hours: Vec<String>,
    pub temperatures: Vec<String>,
    pub conditions: Vec<String>,
    pub selected_hour: String,
    pub feels_like: String,
    pub uv_index: String,
    pub wind_speed: String,
    pub cloud_cover: String,
    pub precipitation: String,
    pub humidity: String,
}

#[async_trait]
pub trait HourlyInputBoundary: Send + Sync {
    async fn execute(&self, input: HourlyInputData);

    async fn execute_default(&self) {
        self.execute(HourlyInputData::default()).await;
    }

    fn switch_to_home_view(&self);
}

pub trait HourlyOutputBoundary: Send + Sync {
    fn prepare_success_view(&self, output: HourlyOutputData);
    fn prepare_fail_view(&self, message: String);
    fn switch_to_home_view(&self);
}

pub struct HourlyInteractor {
    provider: Arc<dyn WeatherProvider>,
    recent: Arc<dyn CityRecencyReader>,
    clock: Arc<dyn Clock>,
    presenter: Arc<dyn HourlyOutputBoundary>,
}

impl HourlyInteractor {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        recent: Arc<dyn CityRecencyReader>,
        clock: Arc<dyn Clock>,
        presenter: Arc<dyn HourlyOutputBoundary>,
    ) -> Self {
        Self { provider, recent, clock, presenter }
    }
}

#[async_trait]
impl HourlyInputBoundary for HourlyInteractor {
    async fn execute(&self, input: HourlyInputData) {
        let city = match resolve_city(input.city.as_deref(), self.recent.as_ref()) {
            Ok(city) => city,
            Err(err) => {
                self.presenter.prepare_fail_view(err.user_message());
                return;
            }
        };

        let hourly = match self.provider.get_hourly_weather(&city).await {
            Ok(hourly) => hourly,
            Err(err) => {
                tracing::warn!("Hourly weather lookup failed: {err}");
                self.presenter.prepare_fail_view(WEATHER_DATA_UNAVAILABLE.to_string());
                return;
            }
        };

        let index = input.hour.unwrap_or(0);
        let Some(selected) = hourly.hours.get(index) else {
            let err =
                InvalidInputError::HourOutOfRange { hour: index, available: hourly.hours.len() };
            self.presenter.prepare_fail_view(err.to_string());
            return;
        };

        // Step in UTC and convert each hour, so DST changes show up in labels.
        let now = self.clock.now();
        let label = |offset: usize| {
            let at = now + Duration::hours(offset as i64);
            format::hour_of_day(at.with_timezone(&hourly.timezone).hour())
        };

        let output = HourlyOutputData {
            city,
            low_temperature: format::celsius(hourly.low_temperature),
            high_temperature: format::celsius(hourly.high_temperature),
            hours: (0..hourly.hours.len()).map(&label).collect(),
            temperatures: hourly.hours.iter().map(|h| format::celsius(h.temperature)).collect(),
            conditions: hourly.hours.iter().map(|h| h.condition.clone()).collect(),
            selected_hour: label(index),
            feels_like: format::celsius(selected.feels_like),
            uv_index: format::uv_index(selected.uv_index),
            wind_speed: format::meters_per_second(selected.wind_speed),
            cloud_cover: format::percent(selected.cloud_cover),
            precipitation: format::percent(selected.precipitation),
            humidity: format::percent(selected.humidity),
        };

        self.presenter.prepare_success_view(output);
    }

    fn switch_to_home_view(&self) {
        self.presenter.switch_to_home_view();
    }
}
