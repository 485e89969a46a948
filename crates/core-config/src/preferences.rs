//! Persisted user preference: the light/dark theme flag.
//!
//! Stored as a one-key TOML file (`theme = "dark"`) under the platform config
//! directory (`~/.config/livepad/preferences.toml` on most platforms). A
//! missing file means "no preference yet"; an unreadable or malformed file is
//! logged and treated the same way so a bad file never blocks startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

pub const PREFERENCES_FILE_NAME: &str = "preferences.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme `{0}` (expected light or dark)")]
pub struct ThemeParseError(pub String);

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeParseError(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<Theme>,
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted at the platform config directory, if one exists.
    pub fn discover() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("livepad").join(PREFERENCES_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_theme(&self) -> Option<Theme> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(target: "prefs", path = %self.path.display(), %err, "preferences_read_failed");
                return None;
            }
        };
        match toml::from_str::<PreferencesPayload>(&content) {
            Ok(payload) => {
                debug!(target: "prefs", theme = ?payload.theme, "preferences_loaded");
                payload.theme
            }
            Err(err) => {
                warn!(target: "prefs", path = %self.path.display(), %err, "preferences_parse_failed");
                None
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let payload = PreferencesPayload { theme: Some(theme) };
        let body = toml::to_string(&payload).context("serializing preferences")?;
        fs::write(&self.path, body)
            .with_context(|| format!("writing {}", self.path.display()))?;
        debug!(target: "prefs", theme = theme.as_str(), "preferences_saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_no_preference() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("none.toml"));
        assert_eq!(store.load_theme(), None);
    }

    #[test]
    fn save_then_load_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("nested").join(PREFERENCES_FILE_NAME));
        store.save_theme(Theme::Dark).unwrap();
        assert_eq!(store.load_theme(), Some(Theme::Dark));
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("theme = \"dark\""));
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        std::fs::write(&path, "theme = \"sepia\"\n").unwrap();
        assert_eq!(PreferenceStore::new(path).load_theme(), None);
    }

    #[test]
    fn theme_toggle_and_parse() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(" Dark ".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }
}
