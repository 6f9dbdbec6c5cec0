//! Debug UI configuration.
//!
//! Loaded from an explicit path, else `<config dir>/porygon/debug_ui.json`,
//! else built-in defaults. A missing file means defaults; a malformed one is
//! an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use porygon_ui::{RepeatConfig, Size, Theme, ThemeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_DIR: &str = "porygon";
const CONFIG_FILE: &str = "debug_ui.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Theme(#[from] ThemeError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugUiConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Built-in theme name, used when `theme_file` is unset.
    pub theme: String,
    pub theme_file: Option<PathBuf>,
    /// Seconds before a held key starts repeating.
    pub key_repeat_delay: f64,
    /// Seconds between repeats.
    pub key_repeat_interval: f64,
    pub watch_timeout_ms: u64,
    /// Seconds of game time between watch refreshes.
    pub watch_refresh_interval: f64,
    pub watch_queue_capacity: usize,
    /// Console lines kept before the oldest are dropped.
    pub console_capacity: usize,
    /// Log sampled frame timings at debug level.
    pub frame_timing: bool,
}

impl Default for DebugUiConfig {
    fn default() -> Self {
        let repeat = RepeatConfig::default();
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            theme: "dark".into(),
            theme_file: None,
            key_repeat_delay: repeat.delay,
            key_repeat_interval: repeat.interval,
            watch_timeout_ms: 100,
            watch_refresh_interval: 0.25,
            watch_queue_capacity: 256,
            console_capacity: 500,
            frame_timing: false,
        }
    }
}

impl DebugUiConfig {
    /// `<config dir>/porygon/debug_ui.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => {
                    tracing::debug!("no platform config dir, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        Self::load_file(&path)
    }

    /// Load one file. Missing file yields defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(?path, "config not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(?path, "loaded debug UI config");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    pub fn repeat(&self) -> RepeatConfig {
        RepeatConfig::new(self.key_repeat_delay, self.key_repeat_interval)
    }

    pub fn watch_timeout(&self) -> Duration {
        Duration::from_millis(self.watch_timeout_ms)
    }

    /// Theme file if set, otherwise the named built-in.
    pub fn load_theme(&self) -> Result<Theme, ConfigError> {
        let theme = match &self.theme_file {
            Some(path) => Theme::from_json_file(path)?,
            None => Theme::by_name(&self.theme)?,
        };
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DebugUiConfig::load(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config, DebugUiConfig::default());
    }

    #[test]
    fn partial_file_overrides_some_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug_ui.json");
        std::fs::write(&path, r#"{ "viewport_width": 640.0, "console_capacity": 10 }"#).unwrap();

        let config = DebugUiConfig::load_file(&path).unwrap();
        assert_eq!(config.viewport(), Size::new(640.0, 720.0));
        assert_eq!(config.console_capacity, 10);
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn frame_timing_is_opt_in() {
        assert!(!DebugUiConfig::default().frame_timing);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug_ui.json");
        std::fs::write(&path, r#"{ "frame_timing": true }"#).unwrap();
        assert!(DebugUiConfig::load_file(&path).unwrap().frame_timing);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug_ui.json");
        std::fs::write(&path, "{ viewport_width: ").unwrap();
        assert!(matches!(DebugUiConfig::load_file(&path), Err(ConfigError::Json { .. })));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("debug_ui.json");
        let config = DebugUiConfig {
            theme: "light".into(),
            watch_timeout_ms: 250,
            ..DebugUiConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(DebugUiConfig::load_file(&path).unwrap(), config);
    }

    #[test]
    fn theme_resolution() {
        let config = DebugUiConfig {
            theme: "light".into(),
            ..DebugUiConfig::default()
        };
        assert_eq!(config.load_theme().unwrap().name, "light");

        let unknown = DebugUiConfig {
            theme: "sepia".into(),
            ..DebugUiConfig::default()
        };
        assert!(matches!(unknown.load_theme(), Err(ConfigError::Theme(ThemeError::Unknown(_)))));
    }

    #[test]
    fn repeat_and_timeout_conversions() {
        let config = DebugUiConfig::default();
        assert_eq!(config.watch_timeout(), Duration::from_millis(100));
        assert_eq!(config.repeat(), RepeatConfig::default());
    }
}
