//! Theme: semantic colors and metrics.
//!
//! Components never hold a theme. The host passes the current `Arc<Theme>`
//! into `begin_frame` and components read `ctx.theme()` on every render, so a
//! theme swap takes effect on the next frame.

use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::primitives::Color;

/// Semantic color palette plus a few layout metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,

    // Backgrounds
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foregrounds
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accents
    pub accent: Color,
    pub accent_hover: Color,
    pub accent_pressed: Color,

    // Status
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,

    pub selection: Color,
    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,

    /// Default inner padding for panels, in pixels.
    pub padding: f32,
    pub border_thickness: f32,
    pub scrollbar_width: f32,
    /// Cursor blink half-period in seconds of game time.
    pub cursor_blink: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".into(),
            bg_primary: Color::rgb(0.08, 0.08, 0.10),
            bg_secondary: Color::rgb(0.12, 0.12, 0.14),
            bg_tertiary: Color::rgb(0.16, 0.16, 0.18),
            fg_primary: Color::rgb(0.9, 0.9, 0.9),
            fg_secondary: Color::rgb(0.6, 0.6, 0.6),
            fg_muted: Color::rgb(0.4, 0.4, 0.4),
            accent: Color::rgb(0.2, 0.6, 1.0),
            accent_hover: Color::rgb(0.4, 0.7, 1.0),
            accent_pressed: Color::rgb(0.14, 0.45, 0.78),
            success: Color::rgb(0.3, 0.8, 0.5),
            error: Color::rgb(0.9, 0.3, 0.3),
            warning: Color::rgb(0.9, 0.7, 0.2),
            info: Color::rgb(0.2, 0.6, 1.0),
            border: Color::rgb(0.2, 0.2, 0.22),
            border_focused: Color::rgb(0.3, 0.5, 0.8),
            selection: Color::rgba(0.3, 0.5, 0.8, 0.35),
            scrollbar_track: Color::rgba(1.0, 1.0, 1.0, 0.04),
            scrollbar_thumb: Color::rgba(1.0, 1.0, 1.0, 0.25),
            padding: 6.0,
            border_thickness: 1.0,
            scrollbar_width: 8.0,
            cursor_blink: 0.5,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".into(),
            bg_primary: Color::rgb(0.96, 0.96, 0.95),
            bg_secondary: Color::rgb(0.90, 0.90, 0.89),
            bg_tertiary: Color::rgb(0.84, 0.84, 0.83),
            fg_primary: Color::rgb(0.1, 0.1, 0.12),
            fg_secondary: Color::rgb(0.35, 0.35, 0.38),
            fg_muted: Color::rgb(0.55, 0.55, 0.58),
            accent: Color::rgb(0.1, 0.45, 0.85),
            accent_hover: Color::rgb(0.2, 0.55, 0.95),
            accent_pressed: Color::rgb(0.05, 0.35, 0.7),
            success: Color::rgb(0.1, 0.6, 0.3),
            error: Color::rgb(0.8, 0.15, 0.15),
            warning: Color::rgb(0.75, 0.5, 0.0),
            info: Color::rgb(0.1, 0.45, 0.85),
            border: Color::rgb(0.75, 0.75, 0.76),
            border_focused: Color::rgb(0.1, 0.45, 0.85),
            selection: Color::rgba(0.1, 0.45, 0.85, 0.25),
            scrollbar_track: Color::rgba(0.0, 0.0, 0.0, 0.04),
            scrollbar_thumb: Color::rgba(0.0, 0.0, 0.0, 0.3),
            padding: 6.0,
            border_thickness: 1.0,
            scrollbar_width: 8.0,
            cursor_blink: 0.5,
        }
    }

    /// Look up a built-in theme.
    pub fn by_name(name: &str) -> Result<Self, ThemeError> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::dark()),
            "light" => Ok(Self::light()),
            _ => Err(ThemeError::Unknown(name.to_owned())),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ThemeError> {
        let text = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ThemeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ThemeError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

static CURRENT: OnceLock<RwLock<Arc<Theme>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Theme>> {
    CURRENT.get_or_init(|| RwLock::new(Arc::new(Theme::dark())))
}

/// Process-wide, hot-swappable theme.
///
/// Only the host touches this; it hands `ThemeManager::current()` to
/// `begin_frame` each frame.
pub struct ThemeManager;

impl ThemeManager {
    pub fn current() -> Arc<Theme> {
        let guard = slot().read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    pub fn set(theme: Theme) {
        let name = theme.name.clone();
        let mut guard = slot().write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(theme);
        tracing::debug!(theme = %name, "theme switched");
    }

    pub fn set_by_name(name: &str) -> Result<(), ThemeError> {
        Self::set(Theme::by_name(name)?);
        Ok(())
    }

    pub fn load_file(path: &Path) -> Result<(), ThemeError> {
        Self::set(Theme::from_json_file(path)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_by_name() {
        assert_eq!(Theme::by_name("dark").unwrap().name, "dark");
        assert_eq!(Theme::by_name("LIGHT").unwrap().name, "light");
        assert!(matches!(Theme::by_name("neon"), Err(ThemeError::Unknown(_))));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let theme = Theme::from_json(r#"{ "name": "custom", "padding": 10.0 }"#).unwrap();
        assert_eq!(theme.name, "custom");
        assert_eq!(theme.padding, 10.0);
        assert_eq!(theme.bg_primary, Theme::dark().bg_primary);
    }

    #[test]
    fn color_alpha_defaults_to_opaque() {
        let theme = Theme::from_json(r#"{ "accent": { "r": 1.0, "g": 0.0, "b": 0.0 } }"#).unwrap();
        assert_eq!(theme.accent, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        let mut theme = Theme::light();
        theme.scrollbar_width = 12.0;
        theme.save(&path).unwrap();
        assert_eq!(Theme::from_json_file(&path).unwrap(), theme);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Theme::from_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ThemeError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_json_error() {
        assert!(matches!(Theme::from_json("{ not json"), Err(ThemeError::Json(_))));
    }

    #[test]
    fn manager_swaps_current() {
        let before = ThemeManager::current();
        ThemeManager::set(Theme::light());
        assert_eq!(ThemeManager::current().name, "light");
        assert_ne!(before.name, "light", "previously handed out Arc is unaffected");
        ThemeManager::set((*before).clone());
    }
}
