use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_API_URL: &str = "https://swd.weatherflow.com/swd/rest/observations/station/";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5 * 60;

/// Credentials for a single Tempest station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationConfig {
    pub station_id: String,
    /// Read-only personal access token for the station.
    pub api_token: String,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_url = "https://swd.weatherflow.com/swd/rest/observations/station/"
/// refresh_interval_secs = 300
///
/// [station]
/// station_id = "142632"
/// api_token = "..."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    pub station: Option<StationConfig>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
            station: None,
        }
    }
}

impl Config {
    /// Return the configured station, or an error with a hint on how to set one up.
    pub fn station(&self) -> Result<&StationConfig> {
        self.station.as_ref().ok_or_else(|| {
            anyhow!(
                "No station configured.\n\
                 Hint: run `tempest configure` and enter your station id and API token."
            )
        })
    }

    /// Set or replace the station credentials.
    pub fn set_station(&mut self, station_id: String, api_token: String) {
        self.station = Some(StationConfig { station_id, api_token });
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!("Saved configuration to {}", path.display());
        Ok(())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "tempest", "tempest-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.station().unwrap_err();

        assert!(err.to_string().contains("No station configured"));
        assert!(err.to_string().contains("tempest configure"));
    }

    #[test]
    fn set_station_replaces_credentials() {
        let mut cfg = Config::default();

        cfg.set_station("1".into(), "OLD".into());
        cfg.set_station("142632".into(), "TOKEN".into());

        let station = cfg.station().expect("station must exist");
        assert_eq!(station.station_id, "142632");
        assert_eq!(station.api_token, "TOKEN");
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = Config::default();
        cfg.refresh_interval_secs = 60;
        cfg.set_station("142632".into(), "TOKEN".into());

        let text = cfg.to_toml().expect("serializes");
        let parsed = Config::from_toml(&text).expect("parses");
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg = Config::from_toml("").expect("empty config is valid");

        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(300));
        assert!(cfg.station.is_none());
    }

    #[test]
    fn zero_refresh_interval_is_clamped() {
        let cfg = Config::from_toml("refresh_interval_secs = 0").unwrap();
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(1));
    }
}
