//! Interactors, one per view.
//!
//! An interactor never returns its result. It calls exactly one of
//! `prepare_success_view` / `prepare_fail_view` on its output boundary per
//! `execute`, and collaborator errors stop at that boundary.

pub mod daily;
pub mod history;
pub mod home;
pub mod hourly;
pub mod summarization;

pub use daily::{
    DailyInputBoundary, DailyInputData, DailyInteractor, DailyOutputBoundary, DailyOutputData,
};
pub use history::{
    HistoryInputBoundary, HistoryInteractor, HistoryOutputBoundary, HistoryOutputData,
};
pub use home::{
    HomeInputBoundary, HomeInputData, HomeInteractor, HomeOutputBoundary, HomeOutputData,
};
pub use hourly::{
    HourlyInputBoundary, HourlyInputData, HourlyInteractor, HourlyOutputBoundary, HourlyOutputData,
};
pub use summarization::{
    SummarizationInputBoundary, SummarizationInputData, SummarizationInteractor,
    SummarizationOutputBoundary, SummarizationOutputData,
};

use crate::{error::PersistenceError, recent::CityRecencyReader};

pub const CITY_NOT_FOUND: &str = "City Not Found";
pub const WEATHER_DATA_UNAVAILABLE: &str = "Weather Data Unavailable";
pub const NO_CITIES_TO_DISPLAY: &str = "No Cities To Display";

/// Why a city could not be resolved for a use case.
#[derive(Debug)]
pub(crate) enum CityResolution {
    NoRecentCity,
    Persistence(PersistenceError),
}

impl CityResolution {
    pub(crate) fn user_message(&self) -> String {
        match self {
            CityResolution::NoRecentCity => NO_CITIES_TO_DISPLAY.to_string(),
            CityResolution::Persistence(err) => err.to_string(),
        }
    }
}

/// Use `explicit` when it names a city, otherwise the most recent one.
pub(crate) fn resolve_city(
    explicit: Option<&str>,
    recent: &dyn CityRecencyReader,
) -> Result<String, CityResolution> {
    if let Some(city) = explicit.map(str::trim).filter(|city| !city.is_empty()) {
        return Ok(city.to_owned());
    }

    match recent.most_recent_city() {
        Ok(Some(city)) => Ok(city),
        Ok(None) => Err(CityResolution::NoRecentCity),
        Err(err) => {
            tracing::error!("Could not read recent cities: {err}");
            Err(CityResolution::Persistence(err))
        }
    }
}
