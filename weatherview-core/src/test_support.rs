//! Fakes shared by the unit tests.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use parking_lot::Mutex;
use std::{any::Any, io};

use crate::{
    clock::FixedClock,
    error::{PersistenceError, PersistenceOperation, ProviderError},
    model::{DailyWeatherSet, HourlyWeatherSet, WeatherSnapshot},
    provider::WeatherProvider,
    recent::{RecencyStore, RecentCityRegistry},
    use_case::{
        DailyOutputBoundary, DailyOutputData, HistoryOutputBoundary, HistoryOutputData,
        HomeOutputBoundary, HomeOutputData, HourlyOutputBoundary, HourlyOutputData,
        SummarizationOutputBoundary, SummarizationOutputData,
    },
    view::ViewName,
};

pub fn snapshot(temperature: f64, condition: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature,
        feels_like: temperature,
        condition: condition.to_string(),
        uv_index: 0.0,
        wind_speed: 0.0,
        cloud_cover: 0.0,
        precipitation: 0.0,
        humidity: 0.0,
    }
}

/// Friday 2025-03-07, 07:00 in Toronto.
pub fn friday_noon_utc() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap())
}

/// Provider that knows a single city and answers with fixed, index-derived
/// readings.
#[derive(Debug)]
pub struct StubProvider {
    city: String,
}

impl StubProvider {
    pub fn with_city(city: &str) -> Self {
        Self { city: city.to_string() }
    }

    fn check(&self, city: &str) -> Result<(), ProviderError> {
        if city == self.city {
            Ok(())
        } else {
            Err(ProviderError::NotFound { city: city.to_string() })
        }
    }
}

const STUB_TZ: Tz = chrono_tz::America::Toronto;

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn get_current_weather(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        self.check(city)?;
        Ok(WeatherSnapshot {
            temperature: 18.0,
            feels_like: 16.0,
            condition: "Sunny".to_string(),
            uv_index: 7.0,
            wind_speed: 12.0,
            cloud_cover: 20.0,
            precipitation: 60.0,
            humidity: 40.0,
        })
    }

    async fn get_hourly_weather(&self, city: &str) -> Result<HourlyWeatherSet, ProviderError> {
        self.check(city)?;
        let hours = (0..24)
            .map(|i| {
                let mut reading = snapshot(20.0 + i as f64, &format!("Hour {i}"));
                reading.feels_like = 19.0 + i as f64;
                reading
            })
            .collect();

        Ok(HourlyWeatherSet {
            timezone: STUB_TZ,
            low_temperature: 11.0,
            high_temperature: 24.0,
            hours,
        })
    }

    async fn get_daily_weather(&self, city: &str) -> Result<DailyWeatherSet, ProviderError> {
        self.check(city)?;
        let days = (0u32..7)
            .map(|i| {
                let n = f64::from(i);
                WeatherSnapshot {
                    temperature: 10.0 + n,
                    feels_like: 9.0 + n,
                    condition: format!("Day {i}"),
                    uv_index: n,
                    wind_speed: 2.0 + n,
                    cloud_cover: 10.0 * n,
                    precipitation: 5.0 * n,
                    humidity: 50.0 + n,
                }
            })
            .collect();

        DailyWeatherSet::try_new(STUB_TZ, days)
            .map_err(|err| ProviderError::unavailable(city, err))
    }
}

/// What a [`RecordingBoundary`] was told, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Success(&'static str),
    Fail(String),
    Switch(ViewName),
}

/// Output boundary for every use case that just records calls.
#[derive(Default)]
pub struct RecordingBoundary {
    events: Mutex<Vec<Event>>,
    outputs: Mutex<Vec<Box<dyn Any + Send>>>,
}

impl RecordingBoundary {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// The single output delivered, asserting nothing else happened.
    pub fn only_success<T: Clone + 'static>(&self) -> T {
        let events = self.events();
        assert_eq!(events, vec![Event::Success(std::any::type_name::<T>())]);

        let outputs = self.outputs.lock();
        outputs[0].downcast_ref::<T>().cloned().unwrap()
    }

    fn success<T: Send + 'static>(&self, output: T) {
        self.events.lock().push(Event::Success(std::any::type_name::<T>()));
        self.outputs.lock().push(Box::new(output));
    }

    fn fail(&self, message: String) {
        self.events.lock().push(Event::Fail(message));
    }

    fn switch(&self, view: ViewName) {
        self.events.lock().push(Event::Switch(view));
    }
}

impl HomeOutputBoundary for RecordingBoundary {
    fn prepare_success_view(&self, output: HomeOutputData) {
        self.success(output);
    }

    fn prepare_fail_view(&self, message: String) {
        self.fail(message);
    }

    fn switch_to_daily_view(&self) {
        self.switch(ViewName::Daily);
    }

    fn switch_to_hourly_view(&self) {
        self.switch(ViewName::Hourly);
    }

    fn switch_to_checker_view(&self) {
        self.switch(ViewName::Checker);
    }

    fn switch_to_summary_view(&self) {
        self.switch(ViewName::Summarization);
    }

    fn switch_to_history_view(&self) {
        self.switch(ViewName::History);
    }
}

macro_rules! recording_boundary {
    ($boundary:ident, $output:ty) => {
        impl $boundary for RecordingBoundary {
            fn prepare_success_view(&self, output: $output) {
                self.success(output);
            }

            fn prepare_fail_view(&self, message: String) {
                self.fail(message);
            }

            fn switch_to_home_view(&self) {
                self.switch(ViewName::Home);
            }
        }
    };
}

recording_boundary!(DailyOutputBoundary, DailyOutputData);
recording_boundary!(HourlyOutputBoundary, HourlyOutputData);
recording_boundary!(SummarizationOutputBoundary, SummarizationOutputData);
recording_boundary!(HistoryOutputBoundary, HistoryOutputData);

/// In-memory store whose reads or writes fail.
#[derive(Debug)]
pub struct FailingStore {
    cities: Mutex<Vec<String>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingStore {
    pub fn failing_writes(cities: Vec<String>) -> Self {
        Self { cities: Mutex::new(cities), fail_reads: false, fail_writes: true }
    }

    pub fn failing_reads() -> Self {
        Self { cities: Mutex::default(), fail_reads: true, fail_writes: false }
    }

    /// A registry whose store can no longer be read.
    pub fn registry_with_failing_reads() -> RecentCityRegistry {
        RecentCityRegistry::open(Self::failing_reads())
    }
}

impl RecencyStore for FailingStore {
    fn read(&self) -> Result<Vec<String>, PersistenceError> {
        if self.fail_reads {
            return Err(PersistenceError::new(
                PersistenceOperation::Read,
                "<failing>",
                io::Error::other("read refused"),
            ));
        }
        Ok(self.cities.lock().clone())
    }

    fn write(&self, cities: &[String]) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::new(
                PersistenceOperation::Write,
                "<failing>",
                io::Error::other("disk full"),
            ));
        }
        *self.cities.lock() = cities.to_vec();
        Ok(())
    }
}
