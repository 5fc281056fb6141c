//! Configuration file support
//!
//! Loads config from ~/.finhealth/config.toml and merges it with command-line
//! overrides into the [`Settings`] the client runs with.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TYPING_INTERVAL_MS: u64 = 30;

/// Contents of config.toml; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Backend base URL
    pub api_url: Option<String>,

    /// Milliseconds per typed character; 0 disables the effect
    pub typing_interval_ms: Option<u64>,

    /// Multiplier for follow-up pauses; 0 makes them immediate
    pub follow_up_delay_scale: Option<f64>,

    /// Per-request timeout
    pub request_timeout_secs: Option<u64>,

    /// ANSI colors in the terminal
    pub color: Option<bool>,
}

impl Config {
    /// Load config from ~/.finhealth/config.toml
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`. A missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Values given on the command line (or their env fallbacks)
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub typing_interval_ms: Option<u64>,
    pub follow_up_delay_scale: Option<f64>,
    pub request_timeout_secs: Option<u64>,
    pub no_color: bool,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub typing_interval: Duration,
    pub follow_up_delay_scale: f64,
    pub request_timeout: Option<Duration>,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            typing_interval: Duration::from_millis(DEFAULT_TYPING_INTERVAL_MS),
            follow_up_delay_scale: 1.0,
            request_timeout: None,
            color: true,
        }
    }
}

impl Settings {
    /// Resolve values: overrides > config file > defaults
    pub fn resolve(overrides: Overrides, file: Config) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = overrides
            .api_url
            .or(file.api_url)
            .unwrap_or(defaults.api_url);
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "api_url",
                reason: format!("{} is not an http(s) URL", api_url),
            });
        }

        let scale = overrides
            .follow_up_delay_scale
            .or(file.follow_up_delay_scale)
            .unwrap_or(defaults.follow_up_delay_scale);
        if !scale.is_finite() || scale < 0.0 {
            return Err(ConfigError::Invalid {
                key: "follow_up_delay_scale",
                reason: format!("{} must be a non-negative number", scale),
            });
        }

        let typing_interval = overrides
            .typing_interval_ms
            .or(file.typing_interval_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.typing_interval);

        let request_timeout = overrides
            .request_timeout_secs
            .or(file.request_timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let color = !overrides.no_color && file.color.unwrap_or(defaults.color);

        Ok(Self {
            api_url,
            typing_interval,
            follow_up_delay_scale: scale,
            request_timeout,
            color,
        })
    }

    /// Pause to actually wait before a follow-up scheduled for `delay`
    pub fn scaled_delay(&self, delay: Duration) -> Duration {
        delay.mul_f64(self.follow_up_delay_scale)
    }
}

/// Directory holding config, history and .env
pub fn config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".finhealth")
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// REPL history file
pub fn history_path() -> PathBuf {
    config_dir().join("chat_history")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert!(config.color.is_none());
    }

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.to_string_lossy().contains(".finhealth"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            "api_url = \"https://prices.example.org\"\ntyping_interval_ms = 0\ncolor = false\n",
        );
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://prices.example.org"));
        assert_eq!(config.typing_interval_ms, Some(0));
        assert_eq!(config.color, Some(false));
    }

    #[test]
    fn test_parse_error_names_file() {
        let file = write_config("api_url = [1, 2");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let file = write_config("colour = true\n");
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(Overrides::default(), Config::default()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_overrides_beat_file() {
        let file = Config {
            api_url: Some("http://file:1".into()),
            typing_interval_ms: Some(10),
            ..Default::default()
        };
        let overrides = Overrides {
            api_url: Some("http://flag:2".into()),
            no_color: true,
            ..Default::default()
        };
        let settings = Settings::resolve(overrides, file).unwrap();
        assert_eq!(settings.api_url, "http://flag:2");
        assert_eq!(settings.typing_interval, Duration::from_millis(10));
        assert!(!settings.color);
    }

    #[test]
    fn test_invalid_values() {
        let bad_url = Overrides {
            api_url: Some("localhost:5000".into()),
            ..Default::default()
        };
        assert!(matches!(
            Settings::resolve(bad_url, Config::default()),
            Err(ConfigError::Invalid { key: "api_url", .. })
        ));

        let bad_scale = Config {
            follow_up_delay_scale: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            Settings::resolve(Overrides::default(), bad_scale),
            Err(ConfigError::Invalid {
                key: "follow_up_delay_scale",
                ..
            })
        ));
    }

    #[test]
    fn test_scaled_delay() {
        let settings = Settings {
            follow_up_delay_scale: 0.5,
            ..Default::default()
        };
        assert_eq!(
            settings.scaled_delay(Duration::from_millis(2000)),
            Duration::from_millis(1000)
        );

        let instant = Settings {
            follow_up_delay_scale: 0.0,
            ..Default::default()
        };
        assert!(instant.scaled_delay(Duration::from_millis(1500)).is_zero());
    }
}
