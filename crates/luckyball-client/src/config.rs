use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

/// Default name of the optional config file next to the working directory.
pub const CONFIG_FILE: &str = "luckyball.toml";

const DEFAULT_SOURCE_URL: &str =
    "https://www.texaslottery.com/export/sites/lottery/Games/Powerball/Winning_Numbers/powerball.csv";
const DEFAULT_CACHE_PATH: &str = "powerball.csv";
const DEFAULT_CACHE_MAX_AGE_HOURS: u64 = 24;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration, passed explicitly into every component.
///
/// Values come from `luckyball.toml` when present, with `LUCKYBALL_*`
/// environment variables taking priority over the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote CSV of historical draws.
    pub source_url: String,
    /// Local snapshot of the remote file; its mtime backs the staleness check.
    pub cache_path: PathBuf,
    pub cache_max_age_hours: u64,
    pub request_timeout_secs: u64,
    /// When set, refresh even if the cached file is within the max age.
    #[serde(skip)]
    pub force_refresh: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_owned(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            cache_max_age_hours: DEFAULT_CACHE_MAX_AGE_HOURS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            force_refresh: false,
        }
    }
}

impl AppConfig {
    /// Load from a TOML file when it exists, otherwise start from defaults;
    /// environment overrides apply either way.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = if path.as_ref().exists() {
            let content = std::fs::read_to_string(&path).with_context(|| {
                format!("Failed to read config file: {}", path.as_ref().display())
            })?;
            toml::from_str(&content).with_context(|| {
                format!("Failed to parse TOML config: {}", path.as_ref().display())
            })?
        } else {
            log::debug!(
                "Config file {} not found, using defaults",
                path.as_ref().display()
            );
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("LUCKYBALL_SOURCE_URL") {
            self.source_url = url;
        }
        if let Ok(path) = std::env::var("LUCKYBALL_CACHE_PATH") {
            self.cache_path = PathBuf::from(path);
        }
        if let Some(hours) = std::env::var("LUCKYBALL_CACHE_MAX_AGE_HOURS")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            self.cache_max_age_hours = hours;
        }
        if let Some(secs) = std::env::var("LUCKYBALL_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            self.request_timeout_secs = secs;
        }
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_hours * 3600)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Load `luckyball.toml` from the working directory.
pub fn load_default() -> Result<AppConfig> {
    AppConfig::load(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_policy() {
        let config = AppConfig::default();
        assert_eq!(config.cache_max_age_hours, 24);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.cache_path, PathBuf::from("powerball.csv"));
        assert!(!config.force_refresh);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("/nonexistent/luckyball.toml").expect("defaults");
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        use std::io::Write as _;

        let temp_dir = std::env::temp_dir().join("luckyball_test_config");
        std::fs::create_dir_all(&temp_dir).expect("Failed to create temp directory");
        let config_path = temp_dir.join(CONFIG_FILE);

        let content = r#"
cache_path = "draws/history.csv"
cache_max_age_hours = 6
"#;
        let mut file = std::fs::File::create(&config_path).expect("Failed to create config file");
        file.write_all(content.as_bytes())
            .expect("Failed to write config");

        let config = AppConfig::load(&config_path).expect("Failed to load config");
        assert_eq!(config.cache_path, PathBuf::from("draws/history.csv"));
        assert_eq!(config.cache_max_age_hours, 6);
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);

        std::fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn invalid_toml_is_an_error() {
        use std::io::Write as _;

        let temp_dir = std::env::temp_dir().join("luckyball_test_config_invalid");
        std::fs::create_dir_all(&temp_dir).expect("Failed to create temp directory");
        let config_path = temp_dir.join(CONFIG_FILE);

        let mut file = std::fs::File::create(&config_path).expect("Failed to create config file");
        file.write_all(b"cache_max_age_hours = \"not a number")
            .expect("Failed to write config");

        assert!(AppConfig::load(&config_path).is_err());

        std::fs::remove_dir_all(&temp_dir).ok();
    }
}
