//! Configuration loading.
//!
//! Read from `<config_dir>/zetamac-tracker/config.toml` when present; every
//! field has a default.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::{
    db::history::DEFAULT_HISTORY_KEY,
    error::{ConfigError, StoreError},
    stats::Window,
};

const APP_DIR: &str = "zetamac-tracker";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub panel: PanelConfig,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// History database path; defaults to the platform data directory.
    #[serde(default)]
    pub database: Option<PathBuf>,

    #[serde(default = "default_history_key")]
    pub history_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: None,
            history_key: default_history_key(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PanelConfig {
    #[serde(default = "default_window")]
    pub default_window: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            default_window: default_window(),
        }
    }
}

fn default_history_key() -> String {
    DEFAULT_HISTORY_KEY.to_string()
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_window() -> String {
    "10".to_string()
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tracker.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tracker.frame_interval_ms must be greater than 0".into(),
            ));
        }
        self.panel_window()?;
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.tracker.frame_interval_ms)
    }

    pub fn panel_window(&self) -> Result<Window, ConfigError> {
        self.panel
            .default_window
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("panel.default_window: {e}")))
    }

    pub fn database_path(&self) -> Result<PathBuf, StoreError> {
        match &self.storage.database {
            Some(path) => Ok(path.clone()),
            None => crate::db::default_db_path(),
        }
    }

    /// Log directory; defaults to `logs` under the platform data directory.
    pub fn log_dir(&self) -> PathBuf {
        match &self.logging.directory {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR).join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.storage.history_key, "gameHistory");
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.panel_window().unwrap(), Window::Last(10));
    }

    #[test]
    fn test_parse_all_sections() {
        let config = Config::parse(
            r#"
            [storage]
            database = "/tmp/zetamac/history.db"
            history_key = "practice"

            [tracker]
            frame_interval_ms = 33

            [logging]
            level = "debug"
            directory = "/tmp/zetamac/logs"

            [panel]
            default_window = "all"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/zetamac/history.db")
        );
        assert_eq!(config.storage.history_key, "practice");
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/zetamac/logs"));
        assert_eq!(config.panel_window().unwrap(), Window::Lifetime);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "[tracker]\nframe_interval_ms = 0\n").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Invalid(_))
        ));

        fs::write(&path, "[panel]\ndefault_window = \"forever\"\n").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.toml")));

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            Config::parse("[tracker\n"),
            Err(ConfigError::Toml(_))
        ));
    }
}
