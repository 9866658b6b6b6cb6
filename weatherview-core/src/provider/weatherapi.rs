use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::ProviderError,
    model::{DailyWeatherSet, HourlyWeatherSet, WEEK_SIZE, WeatherSnapshot},
    provider::{into_provider_error, parse_timezone, truncate_body},
};

use super::WeatherProvider;

const BASE_URL: &str = "http://api.weatherapi.com/v1";

/// WeatherAPI.com error code for an unresolvable `q` parameter.
const NO_MATCHING_LOCATION: i64 = 1006;

const HOURS_AHEAD: usize = 24;

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }

    async fn fetch_forecast(&self, city: &str, days: usize) -> Result<WaForecastResponse> {
        let url = format!("{}/forecast.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("days", &days.to_string()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .context("Failed to send request to WeatherAPI.com (forecast)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read WeatherAPI forecast response body")?;

        if status == StatusCode::BAD_REQUEST && is_unknown_location(&body) {
            return Err(ProviderError::NotFound { city: city.to_owned() }.into());
        }

        if !status.is_success() {
            return Err(anyhow!(
                "WeatherAPI forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse WeatherAPI forecast JSON")
    }
}

fn is_unknown_location(body: &str) -> bool {
    serde_json::from_str::<WaErrorResponse>(body)
        .map(|res| res.error.code == NO_MATCHING_LOCATION)
        .unwrap_or(false)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

impl WaForecastResponse {
    fn current_snapshot(&self) -> WeatherSnapshot {
        let precipitation =
            self.forecast.forecastday.first().map(|d| d.day.daily_chance_of_rain).unwrap_or(0.0);

        WeatherSnapshot {
            temperature: self.current.temp_c,
            feels_like: self.current.feelslike_c,
            condition: self.current.condition.text.clone(),
            uv_index: self.current.uv,
            wind_speed: kph_to_mps(self.current.wind_kph),
            cloud_cover: self.current.cloud,
            precipitation,
            humidity: self.current.humidity,
        }
    }

    fn hourly_set(&self) -> Result<HourlyWeatherSet> {
        let timezone = parse_timezone(&self.location.tz_id)?;
        let today = self
            .forecast
            .forecastday
            .first()
            .ok_or_else(|| anyhow!("WeatherAPI response contained no forecastday data"))?;

        // Hours are listed from local midnight; drop the ones already gone.
        let now = self.location.localtime_epoch.unwrap_or(i64::MIN);
        let hours: Vec<WeatherSnapshot> = self
            .forecast
            .forecastday
            .iter()
            .flat_map(|day| day.hour.iter())
            .filter(|hour| hour.time_epoch + 3600 > now)
            .take(HOURS_AHEAD)
            .map(WaForecastHour::snapshot)
            .collect();

        if hours.is_empty() {
            return Err(anyhow!("WeatherAPI response contained no hourly data"));
        }

        Ok(HourlyWeatherSet {
            timezone,
            low_temperature: today.day.mintemp_c,
            high_temperature: today.day.maxtemp_c,
            hours,
        })
    }

    fn daily_set(&self) -> Result<DailyWeatherSet> {
        let timezone = parse_timezone(&self.location.tz_id)?;
        let available = self.forecast.forecastday.len();
        if available < WEEK_SIZE {
            return Err(anyhow!(
                "WeatherAPI returned {available} forecast days, {WEEK_SIZE} are required \
                 (the free plan is limited to 3)"
            ));
        }

        let days = self
            .forecast
            .forecastday
            .iter()
            .take(WEEK_SIZE)
            .map(WaForecastDay::snapshot)
            .collect();
        DailyWeatherSet::try_new(timezone, days).context("WeatherAPI daily forecast")
    }
}

impl WaForecastHour {
    fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: self.temp_c,
            feels_like: self.feelslike_c,
            condition: self.condition.text.clone(),
            uv_index: self.uv,
            wind_speed: kph_to_mps(self.wind_kph),
            cloud_cover: self.cloud,
            precipitation: self.chance_of_rain,
            humidity: self.humidity,
        }
    }
}

impl WaForecastDay {
    fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: self.day.avgtemp_c,
            feels_like: mean(self.hour.iter().map(|h| h.feelslike_c)).unwrap_or(self.day.avgtemp_c),
            condition: self.day.condition.text.clone(),
            uv_index: self.day.uv,
            wind_speed: kph_to_mps(self.day.maxwind_kph),
            cloud_cover: mean(self.hour.iter().map(|h| h.cloud)).unwrap_or(0.0),
            precipitation: self.day.daily_chance_of_rain,
            humidity: self.day.avghumidity,
        }
    }
}

fn kph_to_mps(kph: f64) -> f64 {
    kph / 3.6
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    code: i64,
}

#[derive(Debug, Deserialize)]
struct WaErrorResponse {
    error: WaErrorBody,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    tz_id: String,
    localtime_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: f64,
    wind_kph: f64,
    cloud: f64,
    uv: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    avgtemp_c: f64,
    maxwind_kph: f64,
    avghumidity: f64,
    #[serde(default)]
    daily_chance_of_rain: f64,
    uv: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    time_epoch: i64,
    temp_c: f64,
    feelslike_c: f64,
    humidity: f64,
    wind_kph: f64,
    cloud: f64,
    #[serde(default)]
    chance_of_rain: f64,
    uv: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    day: WaDay,
    hour: Vec<WaForecastHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn get_current_weather(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        self.fetch_forecast(city, 1)
            .await
            .map(|res| res.current_snapshot())
            .map_err(|err| into_provider_error(city, err))
    }

    async fn get_hourly_weather(&self, city: &str) -> Result<HourlyWeatherSet, ProviderError> {
        // Two days so the next 24 hours are covered late in the evening.
        let res = self.fetch_forecast(city, 2).await.map_err(|err| into_provider_error(city, err))?;
        res.hourly_set().map_err(|err| into_provider_error(city, err))
    }

    async fn get_daily_weather(&self, city: &str) -> Result<DailyWeatherSet, ProviderError> {
        let res = self
            .fetch_forecast(city, WEEK_SIZE)
            .await
            .map_err(|err| into_provider_error(city, err))?;
        res.daily_set().map_err(|err| into_provider_error(city, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn hour(epoch: i64, temp: f64) -> Value {
        json!({
            "time_epoch": epoch,
            "temp_c": temp,
            "feelslike_c": temp - 1.0,
            "humidity": 70,
            "wind_kph": 18.0,
            "cloud": 40,
            "chance_of_rain": 20,
            "uv": 3.0,
            "condition": { "text": "Partly cloudy" }
        })
    }

    fn forecast_body(days: usize) -> Value {
        let forecastday: Vec<Value> = (0..days)
            .map(|d| {
                let start = 1_700_000_000 + d as i64 * 86_400;
                json!({
                    "day": {
                        "maxtemp_c": 15.0 + d as f64,
                        "mintemp_c": 5.0,
                        "avgtemp_c": 10.0 + d as f64,
                        "maxwind_kph": 36.0,
                        "avghumidity": 80,
                        "daily_chance_of_rain": 60,
                        "uv": 4.0,
                        "condition": { "text": format!("Day {d}") }
                    },
                    "hour": (0..24).map(|h| hour(start + h * 3600, h as f64)).collect::<Vec<_>>()
                })
            })
            .collect();

        json!({
            "location": { "tz_id": "Europe/Oslo", "localtime_epoch": 1_700_000_000 + 5 * 3600 + 120 },
            "current": {
                "temp_c": 7.5,
                "feelslike_c": 5.0,
                "humidity": 81,
                "wind_kph": 7.2,
                "cloud": 75,
                "uv": 1.0,
                "condition": { "text": "Overcast" }
            },
            "forecast": { "forecastday": forecastday }
        })
    }

    async fn mock_forecast(server: &MockServer, days: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .and(query_param("days", days))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn current_weather_maps_units() {
        let server = MockServer::start().await;
        mock_forecast(&server, "1", forecast_body(1)).await;

        let provider = WeatherApiProvider::with_base_url("KEY".into(), server.uri());
        let snapshot = provider.get_current_weather("Oslo").await.unwrap();

        assert_eq!(snapshot.temperature, 7.5);
        assert_eq!(snapshot.condition, "Overcast");
        assert!((snapshot.wind_speed - 2.0).abs() < 1e-9);
        assert_eq!(snapshot.precipitation, 60.0);
    }

    #[tokio::test]
    async fn hourly_weather_starts_at_current_hour() {
        let server = MockServer::start().await;
        mock_forecast(&server, "2", forecast_body(2)).await;

        let provider = WeatherApiProvider::with_base_url("KEY".into(), server.uri());
        let set = provider.get_hourly_weather("Oslo").await.unwrap();

        assert_eq!(set.timezone, chrono_tz::Europe::Oslo);
        assert_eq!(set.hours.len(), HOURS_AHEAD);
        assert_eq!(set.current().unwrap().temperature, 5.0);
        assert_eq!((set.low_temperature, set.high_temperature), (5.0, 15.0));
    }

    #[tokio::test]
    async fn daily_weather_needs_seven_days() {
        let server = MockServer::start().await;
        mock_forecast(&server, "7", forecast_body(3)).await;

        let provider = WeatherApiProvider::with_base_url("KEY".into(), server.uri());
        let err = provider.get_daily_weather("Oslo").await.unwrap_err();

        assert!(matches!(err, ProviderError::Unavailable { .. }));
        assert!(err.to_string().contains("3 forecast days"));
    }

    #[tokio::test]
    async fn daily_weather_keeps_today_first_order() {
        let server = MockServer::start().await;
        mock_forecast(&server, "7", forecast_body(7)).await;

        let provider = WeatherApiProvider::with_base_url("KEY".into(), server.uri());
        let set = provider.get_daily_weather("Oslo").await.unwrap();

        let conditions: Vec<&str> = set.days().iter().map(|d| d.condition.as_str()).collect();
        assert_eq!(conditions, ["Day 0", "Day 1", "Day 2", "Day 3", "Day 4", "Day 5", "Day 6"]);
    }

    #[tokio::test]
    async fn unknown_location_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 1006, "message": "No matching location found." }
            })))
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::with_base_url("KEY".into(), server.uri());
        let err = provider.get_current_weather("Nowhere").await.unwrap_err();

        assert!(matches!(err, ProviderError::NotFound { ref city } if city == "Nowhere"));
    }

    #[tokio::test]
    async fn server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let provider = WeatherApiProvider::with_base_url("KEY".into(), server.uri());
        let err = provider.get_hourly_weather("Oslo").await.unwrap_err();

        assert!(matches!(err, ProviderError::Unavailable { .. }));
        assert!(err.to_string().contains("503"));
    }
}
