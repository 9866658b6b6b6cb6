use crate::{
    Config,
    error::ProviderError,
    model::{DailyWeatherSet, HourlyWeatherSet, WeatherSnapshot},
    provider::{openweather::OpenWeatherProvider, weatherapi::WeatherApiProvider},
};
use async_trait::async_trait;
use chrono_tz::Tz;
use std::{convert::TryFrom, fmt::Debug, sync::Arc};

pub mod openweather;
pub mod weatherapi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    WeatherApi,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::WeatherApi => "weatherapi",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::WeatherApi]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "weatherapi" => Ok(ProviderId::WeatherApi),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, weatherapi."
            )),
        }
    }
}

/// Source of raw weather data for a city at three granularities.
///
/// Implementations decide on retries and timeouts; callers make exactly one
/// call per request.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_current_weather(&self, city: &str) -> Result<WeatherSnapshot, ProviderError>;

    async fn get_hourly_weather(&self, city: &str) -> Result<HourlyWeatherSet, ProviderError>;

    async fn get_daily_weather(&self, city: &str) -> Result<DailyWeatherSet, ProviderError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.provider_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `weatherview configure {id}` and enter your API key."
        )
    })?;

    let provider: Arc<dyn WeatherProvider> = match id {
        ProviderId::OpenWeather => Arc::new(OpenWeatherProvider::new(api_key.to_owned())),
        ProviderId::WeatherApi => Arc::new(WeatherApiProvider::new(api_key.to_owned())),
    };

    Ok(provider)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

/// Collapse an adapter failure into a [`ProviderError`], keeping a
/// `NotFound` raised deep inside the adapter intact.
pub(crate) fn into_provider_error(city: &str, err: anyhow::Error) -> ProviderError {
    match err.downcast::<ProviderError>() {
        Ok(provider_err) => provider_err,
        Err(err) => ProviderError::unavailable(city, format!("{err:#}")),
    }
}

pub(crate) fn parse_timezone(id: &str) -> anyhow::Result<Tz> {
    id.parse::<Tz>().map_err(|err| anyhow::anyhow!("Unknown timezone '{id}': {err}"))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
