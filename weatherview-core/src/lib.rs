//! Core library for the `weatherview` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over weather providers, with weatherapi.com and OpenWeather adapters
//! - The recently viewed cities registry and its stores
//! - Use cases (interactors), presenters and observable per-view state
//!
//! It is used by `weatherview-cli`, but the [`App`] wiring works with any
//! front end that can subscribe to a [`ViewModel`].

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod forecast;
pub mod format;
pub mod model;
pub mod presenter;
pub mod provider;
pub mod recent;
pub mod use_case;
pub mod view;

#[cfg(test)]
mod test_support;

pub use app::App;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ProviderConfig};
pub use error::{AlignmentPrecondition, InvalidInputError, PersistenceError, ProviderError};
pub use model::{DailyWeatherSet, HourlyWeatherSet, WeatherSnapshot};
pub use presenter::ViewModels;
pub use provider::{ProviderId, WeatherProvider};
pub use recent::{JsonFileStore, MemoryStore, RecencyStore, RecentCityRegistry};
pub use view::{Notification, ViewModel, ViewName, ViewState};
