use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::model::WEEK_SIZE;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which step of the recent-city read/modify/write cycle failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceOperation {
    Read,
    Parse,
    Write,
}

impl fmt::Display for PersistenceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PersistenceOperation::Read => "Read",
            PersistenceOperation::Parse => "Parse",
            PersistenceOperation::Write => "Write",
        })
    }
}

/// Failure of the persistent recency store.
///
/// The message is shown to the user as-is, since it points at a local
/// environment problem rather than a remote one.
#[derive(Debug, Error)]
#[error("Failed To {operation} Recent City Data: {}", path.display())]
pub struct PersistenceError {
    pub operation: PersistenceOperation,
    pub path: PathBuf,
    #[source]
    pub source: BoxError,
}

impl PersistenceError {
    pub fn new(
        operation: PersistenceOperation,
        path: impl Into<PathBuf>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self { operation, path: path.into(), source: source.into() }
    }
}

/// Failure reported by a [`WeatherProvider`](crate::provider::WeatherProvider).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No weather data found for '{city}'")]
    NotFound { city: String },

    #[error("Weather request for '{city}' failed: {reason}")]
    Unavailable { city: String, reason: String },
}

impl ProviderError {
    pub fn city(&self) -> &str {
        match self {
            ProviderError::NotFound { city } | ProviderError::Unavailable { city, .. } => city,
        }
    }

    pub fn unavailable(city: &str, reason: impl fmt::Display) -> Self {
        ProviderError::Unavailable { city: city.to_owned(), reason: reason.to_string() }
    }
}

/// Caller-supplied input that fails validation before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("No City Name Provided")]
    EmptyCityName,

    #[error("Unknown Weekday: {0}")]
    UnknownWeekday(String),

    #[error("Hour Out Of Range: {hour} (available: 0..{available})")]
    HourOutOfRange { hour: usize, available: usize },
}

/// A daily weather set did not hold exactly one entry per weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("daily weather set must hold exactly {expected} days, got {actual}")]
pub struct AlignmentPrecondition {
    pub expected: usize,
    pub actual: usize,
}

impl AlignmentPrecondition {
    pub(crate) fn with_actual(actual: usize) -> Self {
        Self { expected: WEEK_SIZE, actual }
    }
}
