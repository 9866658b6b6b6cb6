use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::provider::ProviderId;

const CONFIG_FILE: &str = "config.toml";
const RECENT_CITIES_FILE: &str = "recent_cities.json";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Credentials for one weather provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// `config.toml` in the platform config directory.
///
/// ```toml
/// default_provider = "weatherapi"
/// recent_cities_path = "/home/me/.cities.json"
/// log_level = "info"
///
/// [providers.weatherapi]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Provider used by every weather command.
    pub default_provider: Option<String>,

    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// Overrides `<data dir>/recent_cities.json`.
    pub recent_cities_path: Option<PathBuf>,

    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_level: Option<String>,
}

impl Config {
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        let name = self.default_provider.as_deref().ok_or_else(|| {
            anyhow!(
                "No default provider configured.\n\
                 Hint: run `weatherview configure <provider>` (e.g. `weatherview configure weatherapi`) first."
            )
        })?;

        ProviderId::try_from(name)
    }

    /// Read the config file; a missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let contents =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weatherview", "weatherview")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join(CONFIG_FILE))
    }

    pub fn recent_cities_file_path(&self) -> Result<PathBuf> {
        match &self.recent_cities_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::project_dirs()?.data_dir().join(RECENT_CITIES_FILE)),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Store `api_key` for `id`. The first provider configured becomes the
    /// default.
    pub fn upsert_provider_api_key(&mut self, id: ProviderId, api_key: String) {
        self.providers.insert(id.as_str().to_owned(), ProviderConfig { api_key });
        self.default_provider.get_or_insert_with(|| id.as_str().to_owned());
    }

    pub fn provider_api_key(&self, id: ProviderId) -> Option<&str> {
        self.providers.get(id.as_str()).map(|provider| provider.api_key.as_str())
    }

    pub fn is_provider_configured(&self, id: ProviderId) -> bool {
        self.provider_api_key(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_default_provider_has_a_hint() {
        let err = Config::default().default_provider_id().unwrap_err();

        assert!(err.to_string().contains("No default provider configured"));
        assert!(err.to_string().contains("weatherview configure"));
    }

    #[test]
    fn first_configured_provider_becomes_default() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OPEN_KEY".into());
        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "WEATHER_KEY".into());

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::OpenWeather);
        assert_eq!(cfg.provider_api_key(ProviderId::WeatherApi), Some("WEATHER_KEY"));
        assert!(cfg.is_provider_configured(ProviderId::OpenWeather));
    }

    #[test]
    fn replacing_a_key_keeps_one_entry() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "OLD".into());
        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "NEW".into());

        assert_eq!(cfg.providers.len(), 1);
        assert_eq!(cfg.provider_api_key(ProviderId::WeatherApi), Some("NEW"));
        assert!(!cfg.is_provider_configured(ProviderId::OpenWeather));
    }

    #[test]
    fn recent_cities_path_override_wins() {
        let cfg = Config::from_toml(
            r#"
            default_provider = "weatherapi"
            recent_cities_path = "/var/lib/weatherview/recent.json"
            log_level = "debug"

            [providers.weatherapi]
            api_key = "KEY"
            "#,
        )
        .unwrap();

        assert_eq!(
            cfg.recent_cities_file_path().unwrap(),
            PathBuf::from("/var/lib/weatherview/recent.json")
        );
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.provider_api_key(ProviderId::WeatherApi), Some("KEY"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = Config::from_toml("").unwrap();

        assert!(cfg.providers.is_empty());
        assert!(cfg.default_provider.is_none());
        assert_eq!(cfg.log_level(), "warn");
    }
}
