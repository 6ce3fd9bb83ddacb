//! UI preferences
//!
//! Holds the theme choice. It is read from disk once, written through on
//! every change, and broadcast to watchers. The wizard never reads it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::PreferenceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// On-disk shape: a single boolean
#[derive(Debug, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(rename = "darkMode")]
    dark_mode: bool,
}

impl From<Theme> for StoredPreferences {
    fn from(theme: Theme) -> Self {
        Self {
            dark_mode: theme == Theme::Dark,
        }
    }
}

impl From<StoredPreferences> for Theme {
    fn from(stored: StoredPreferences) -> Self {
        if stored.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Theme preference backed by a JSON file
pub struct PreferenceStore {
    path: PathBuf,
    theme: watch::Sender<Theme>,
}

impl PreferenceStore {
    /// Read the stored preference, falling back to the default theme when the
    /// file is missing or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let theme = match read_theme(&path) {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(
                    "Ignoring unreadable preferences at {}: {}",
                    path.display(),
                    e
                );
                Theme::default()
            }
        };
        debug!("Theme preference: {}", theme.name());
        let (theme, _) = watch::channel(theme);
        Self { path, theme }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn theme(&self) -> Theme {
        *self.theme.borrow()
    }

    /// Receive the current theme and every later change
    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.theme.subscribe()
    }

    /// Persist and publish a theme
    pub fn set_theme(&self, theme: Theme) -> Result<(), PreferenceError> {
        write_theme(&self.path, theme)?;
        self.theme.send_replace(theme);
        debug!("Theme set to {}", theme.name());
        Ok(())
    }

    pub fn toggle(&self) -> Result<Theme, PreferenceError> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}

fn read_theme(path: &Path) -> Result<Option<Theme>, PreferenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let stored: StoredPreferences = serde_json::from_str(&contents)?;
    Ok(Some(stored.into()))
}

fn write_theme(path: &Path, theme: Theme) -> Result<(), PreferenceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string(&StoredPreferences::from(theme))?;
    std::fs::write(path, contents)?;
    Ok(())
}
