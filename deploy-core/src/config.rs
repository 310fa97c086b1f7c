use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Top-level configuration stored on disk.
///
/// Every field has a working default, so a missing config file is not an
/// error. The endpoint URLs exist mostly so tests and local mocks can point
/// the client somewhere else.
///
/// Example TOML:
/// ```toml
/// geocoding_url = "https://geocoding-api.open-meteo.com"
/// forecast_url = "https://api.open-meteo.com"
/// timeout_secs = 10
/// log_file = "/tmp/deploy-mcp.log"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the geocoding service.
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Base URL of the forecast service (current weather and timezone).
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where the debug log stream goes. Stdout is reserved for protocol
    /// responses, so logs always land in a file.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com".to_owned()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com".to_owned()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("deploy-mcp.log")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            timeout_secs: default_timeout_secs(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or return defaults if
    /// the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, run on defaults.
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "deploy-advisor", "deploy-mcp")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_open_meteo() {
        let cfg = Config::default();
        assert_eq!(cfg.geocoding_url, "https://geocoding-api.open-meteo.com");
        assert_eq!(cfg.forecast_url, "https://api.open-meteo.com");
        assert_eq!(cfg.timeout_secs, 10);
        assert!(cfg.log_file.ends_with("deploy-mcp.log"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg: Config = toml::from_str("timeout_secs = 3").expect("valid TOML");
        assert_eq!(cfg.timeout_secs, 3);
        assert_eq!(cfg.geocoding_url, "https://geocoding-api.open-meteo.com");
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config {
            geocoding_url: "http://localhost:9100".to_owned(),
            log_file: PathBuf::from("/tmp/advisor-test.log"),
            ..Config::default()
        };

        let rendered = toml::to_string_pretty(&cfg).expect("serializes");
        let parsed: Config = toml::from_str(&rendered).expect("parses back");

        assert_eq!(parsed.geocoding_url, "http://localhost:9100");
        assert_eq!(parsed.log_file, PathBuf::from("/tmp/advisor-test.log"));
        assert_eq!(parsed.timeout_secs, cfg.timeout_secs);
    }
}
