use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    format, model::WeatherSnapshot, provider::WeatherProvider, recent::CityRecencyReader,
};

use super::{WEATHER_DATA_UNAVAILABLE, resolve_city};

const HIGH_UV: f64 = 6.0;
const LIKELY_PRECIPITATION: f64 = 50.0;
const STRONG_WIND: f64 = 10.0;

#[derive(Debug, Clone, Default)]
pub struct SummarizationInputData {
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummarizationOutputData {
    pub city: String,
    pub temperature: String,
    pub feels_like: String,
    pub condition: String,
    pub summary: String,
    /// What to wear and what to bring, most important first.
    pub advice: Vec<String>,
}

#[async_trait]
pub trait SummarizationInputBoundary: Send + Sync {
    async fn execute(&self, input: SummarizationInputData);

    async fn execute_default(&self) {
        self.execute(SummarizationInputData::default()).await;
    }

    fn switch_to_home_view(&self);
}

pub trait SummarizationOutputBoundary: Send + Sync {
    fn prepare_success_view(&self, output: SummarizationOutputData);
    fn prepare_fail_view(&self, message: String);
    fn switch_to_home_view(&self);
}

pub struct SummarizationInteractor {
    provider: Arc<dyn WeatherProvider>,
    recent: Arc<dyn CityRecencyReader>,
    presenter: Arc<dyn SummarizationOutputBoundary>,
}

impl SummarizationInteractor {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        recent: Arc<dyn CityRecencyReader>,
        presenter: Arc<dyn SummarizationOutputBoundary>,
    ) -> Self {
        Self { provider, recent, presenter }
    }
}

/// Clothing advice keyed on the felt temperature, then extras for rain,
/// sun and wind.
pub fn advice(current: &WeatherSnapshot) -> Vec<String> {
    let layers = match current.feels_like {
        t if t < 0.0 => "Freezing: wear a winter coat, hat and gloves.",
        t if t < 10.0 => "Cold: wear a warm jacket.",
        t if t < 18.0 => "Cool: a light jacket or sweater is enough.",
        t if t < 25.0 => "Mild: a t-shirt with a light layer works.",
        _ => "Hot: wear light, breathable clothing.",
    };

    let mut advice = vec![layers.to_string()];
    if current.precipitation >= LIKELY_PRECIPITATION {
        advice.push("Rain is likely: bring an umbrella.".to_string());
    }
    if current.uv_index >= HIGH_UV {
        advice.push("UV is high: wear sunscreen and sunglasses.".to_string());
    }
    if current.wind_speed >= STRONG_WIND {
        advice.push("It is windy: add a windproof layer.".to_string());
    }
    advice
}

#[async_trait]
impl SummarizationInputBoundary for SummarizationInteractor {
    async fn execute(&self, input: SummarizationInputData) {
        let city = match resolve_city(input.city.as_deref(), self.recent.as_ref()) {
            Ok(city) => city,
            Err(err) => {
                self.presenter.prepare_fail_view(err.user_message());
                return;
            }
        };

        let current = match self.provider.get_current_weather(&city).await {
            Ok(current) => current,
            Err(err) => {
                tracing::warn!("Current weather lookup failed: {err}");
                self.presenter.prepare_fail_view(WEATHER_DATA_UNAVAILABLE.to_string());
                return;
            }
        };

        let temperature = format::celsius(current.temperature);
        let feels_like = format::celsius(current.feels_like);
        let summary =
            format!("{} in {city}, {temperature}, feels like {feels_like}.", current.condition);

        self.presenter.prepare_success_view(SummarizationOutputData {
            advice: advice(&current),
            condition: current.condition,
            city,
            temperature,
            feels_like,
            summary,
        });
    }

    fn switch_to_home_view(&self) {
        self.presenter.switch_to_home_view();
    }
}
