use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::ProviderError,
    model::{DailyWeatherSet, HourlyWeatherSet, WEEK_SIZE, WeatherSnapshot},
    provider::{into_provider_error, parse_timezone, truncate_body},
};

use super::WeatherProvider;

const BASE_URL: &str = "https://api.openweathermap.org";

/// OpenWeather geocoding + One Call 3.0.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse OpenWeather {what} JSON"))
    }

    async fn locate(&self, city: &str) -> Result<OwPlace> {
        let places: Vec<OwPlace> =
            self.get_json("/geo/1.0/direct", &[("q", city), ("limit", "1")], "geocoding").await?;

        places
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NotFound { city: city.to_owned() }.into())
    }

    async fn one_call(&self, city: &str) -> Result<OwOneCall> {
        let place = self.locate(city).await?;
        let (lat, lon) = (place.lat.to_string(), place.lon.to_string());

        self.get_json(
            "/data/3.0/onecall",
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", "metric"),
                ("exclude", "minutely,alerts"),
            ],
            "one call",
        )
        .await
    }
}

fn condition(weather: &[OwWeather]) -> String {
    weather.first().map(|w| w.description.clone()).unwrap_or_else(|| "Unknown".to_string())
}

impl OwOneCall {
    fn current_snapshot(&self) -> WeatherSnapshot {
        let precipitation = self.hourly.first().map(|h| h.pop * 100.0).unwrap_or(0.0);

        WeatherSnapshot {
            temperature: self.current.temp,
            feels_like: self.current.feels_like,
            condition: condition(&self.current.weather),
            uv_index: self.current.uvi,
            wind_speed: self.current.wind_speed,
            cloud_cover: self.current.clouds,
            precipitation,
            humidity: self.current.humidity,
        }
    }

    fn hourly_set(&self) -> Result<HourlyWeatherSet> {
        let timezone = parse_timezone(&self.timezone)?;
        let today = self
            .daily
            .first()
            .ok_or_else(|| anyhow!("OpenWeather response contained no daily data"))?;

        if self.hourly.is_empty() {
            return Err(anyhow!("OpenWeather response contained no hourly data"));
        }

        Ok(HourlyWeatherSet {
            timezone,
            low_temperature: today.temp.min,
            high_temperature: today.temp.max,
            hours: self.hourly.iter().map(OwHour::snapshot).collect(),
        })
    }

    fn daily_set(&self) -> Result<DailyWeatherSet> {
        let timezone = parse_timezone(&self.timezone)?;
        if self.daily.len() < WEEK_SIZE {
            return Err(anyhow!(
                "OpenWeather returned {} forecast days, {WEEK_SIZE} are required",
                self.daily.len()
            ));
        }

        // One Call returns eight days; the eighth falls outside the week.
        let days = self.daily.iter().take(WEEK_SIZE).map(OwDay::snapshot).collect();
        DailyWeatherSet::try_new(timezone, days).context("OpenWeather daily forecast")
    }
}

impl OwHour {
    fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: self.temp,
            feels_like: self.feels_like,
            condition: condition(&self.weather),
            uv_index: self.uvi,
            wind_speed: self.wind_speed,
            cloud_cover: self.clouds,
            precipitation: self.pop * 100.0,
            humidity: self.humidity,
        }
    }
}

impl OwDay {
    fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: self.temp.day,
            feels_like: self.feels_like.day,
            condition: condition(&self.weather),
            uv_index: self.uvi,
            wind_speed: self.wind_speed,
            cloud_cover: self.clouds,
            precipitation: self.pop * 100.0,
            humidity: self.humidity,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwPlace {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    uvi: f64,
    clouds: f64,
    wind_speed: f64,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwHour {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    uvi: f64,
    clouds: f64,
    wind_speed: f64,
    #[serde(default)]
    pop: f64,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwDayTemp {
    day: f64,
    min: f64,
    max: f64,
}

#[derive(Debug, Deserialize)]
struct OwDayFeelsLike {
    day: f64,
}

#[derive(Debug, Deserialize)]
struct OwDay {
    temp: OwDayTemp,
    feels_like: OwDayFeelsLike,
    humidity: f64,
    uvi: f64,
    clouds: f64,
    wind_speed: f64,
    #[serde(default)]
    pop: f64,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwOneCall {
    timezone: String,
    current: OwCurrent,
    #[serde(default)]
    hourly: Vec<OwHour>,
    #[serde(default)]
    daily: Vec<OwDay>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_current_weather(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        self.one_call(city)
            .await
            .map(|res| res.current_snapshot())
            .map_err(|err| into_provider_error(city, err))
    }

    async fn get_hourly_weather(&self, city: &str) -> Result<HourlyWeatherSet, ProviderError> {
        let res = self.one_call(city).await.map_err(|err| into_provider_error(city, err))?;
        res.hourly_set().map_err(|err| into_provider_error(city, err))
    }

    async fn get_daily_weather(&self, city: &str) -> Result<DailyWeatherSet, ProviderError> {
        let res = self.one_call(city).await.map_err(|err| into_provider_error(city, err))?;
        res.daily_set().map_err(|err| into_provider_error(city, err))
    }
}
