use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    clock::Clock,
    error::InvalidInputError,
    format,
    model::HourlyWeatherSet,
    provider::WeatherProvider,
    recent::{CityRecencyReader, CityRecencyWriter},
};

use super::{CITY_NOT_FOUND, resolve_city};

#[derive(Debug, Clone, Default)]
pub struct HomeInputData {
    pub city_name: String,
}

impl HomeInputData {
    pub fn new(city_name: impl Into<String>) -> Self {
        Self { city_name: city_name.into() }
    }
}

/// Current conditions for the home screen, formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeOutputData {
    pub city: String,
    pub low_temperature: String,
    pub high_temperature: String,
    pub temperature: String,
    pub condition: String,
    pub date: String,
}

#[async_trait]
pub trait HomeInputBoundary: Send + Sync {
    /// Look up `input.city_name`, recording it as the most recent city.
    async fn execute(&self, input: HomeInputData);

    /// Show the most recent city again.
    async fn execute_default(&self);

    fn switch_to_daily_view(&self);
    fn switch_to_hourly_view(&self);
    fn switch_to_checker_view(&self);
    fn switch_to_summary_view(&self);
    fn switch_to_history_view(&self);
}

pub trait HomeOutputBoundary: Send + Sync {
    fn prepare_success_view(&self, output: HomeOutputData);
    fn prepare_fail_view(&self, message: String);

    fn switch_to_daily_view(&self);
    fn switch_to_hourly_view(&self);
    fn switch_to_checker_view(&self);
    fn switch_to_summary_view(&self);
    fn switch_to_history_view(&self);
}

pub struct HomeInteractor {
    provider: Arc<dyn WeatherProvider>,
    recent: Arc<dyn CityRecencyReader>,
    recorder: Arc<dyn CityRecencyWriter>,
    clock: Arc<dyn Clock>,
    presenter: Arc<dyn HomeOutputBoundary>,
}

impl HomeInteractor {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        recent: Arc<dyn CityRecencyReader>,
        recorder: Arc<dyn CityRecencyWriter>,
        clock: Arc<dyn Clock>,
        presenter: Arc<dyn HomeOutputBoundary>,
    ) -> Self {
        Self { provider, recent, recorder, clock, presenter }
    }

    async fn present_city(&self, city: &str) {
        let hourly = match self.provider.get_hourly_weather(city).await {
            Ok(hourly) => hourly,
            Err(err) => {
                tracing::warn!("Home weather lookup failed: {err}");
                self.presenter.prepare_fail_view(CITY_NOT_FOUND.to_string());
                return;
            }
        };

        match self.output_data(city, &hourly) {
            Some(output) => self.presenter.prepare_success_view(output),
            None => {
                tracing::warn!("Hourly weather for '{city}' has no readings");
                self.presenter.prepare_fail_view(CITY_NOT_FOUND.to_string());
            }
        }
    }

    fn output_data(&self, city: &str, hourly: &HourlyWeatherSet) -> Option<HomeOutputData> {
        let current = hourly.current()?;
        let now = self.clock.now().with_timezone(&hourly.timezone);

        Some(HomeOutputData {
            city: city.to_owned(),
            low_temperature: format::celsius(hourly.low_temperature),
            high_temperature: format::celsius(hourly.high_temperature),
            temperature: format::celsius(current.temperature),
            condition: current.condition.clone(),
            date: format::long_date(&now),
        })
    }
}

#[async_trait]
impl HomeInputBoundary for HomeInteractor {
    async fn execute(&self, input: HomeInputData) {
        let city = input.city_name.trim();
        if city.is_empty() {
            self.presenter.prepare_fail_view(InvalidInputError::EmptyCityName.to_string());
            return;
        }

        // Recorded before the lookup, so unknown cities still show up in history.
        if let Err(err) = self.recorder.add_city(city) {
            self.presenter.prepare_fail_view(err.to_string());
            return;
        }

        self.present_city(city).await;
    }

    async fn execute_default(&self) {
        match resolve_city(None, self.recent.as_ref()) {
            Ok(city) => self.present_city(&city).await,
            Err(err) => self.presenter.prepare_fail_view(err.user_message()),
        }
    }

    fn switch_to_daily_view(&self) {
        self.presenter.switch_to_daily_view();
    }

    fn switch_to_hourly_view(&self) {
        self.presenter.switch_to_hourly_view();
    }

    fn switch_to_checker_view(&self) {
        self.presenter.switch_to_checker_view();
    }

    fn switch_to_summary_view(&self) {
        self.presenter.switch_to_summary_view();
    }

    fn switch_to_history_view(&self) {
        self.presenter.switch_to_history_view();
    }
}
