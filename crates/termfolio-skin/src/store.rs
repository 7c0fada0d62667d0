//! Persisted theme preference.
//!
//! The preference is one key (`theme`) in a small TOML file under the user's
//! config directory. It is read once at session start and written every
//! time a theme is successfully applied.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use termfolio_types::error::Result;

/// Durable storage for the chosen theme name.
pub trait ThemeStore {
    /// Read the stored theme name, if any.
    fn load(&self) -> Result<Option<String>>;

    /// Persist a theme name, replacing any previous value.
    fn save(&mut self, name: &str) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

/// Preference file on disk.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/termfolio/preferences.toml`, when the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("termfolio").join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)?;
        let prefs: Preferences = toml::from_str(&text)?;
        Ok(prefs.theme)
    }

    fn save(&mut self, name: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let prefs = Preferences {
            theme: Some(name.to_string()),
        };
        std::fs::write(&self.path, toml::to_string(&prefs)?)?;
        log::debug!("Saved theme preference '{name}' to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store, used when no config directory exists and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    value: Option<String>,
    writes: usize,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `name`.
    pub fn with_value(name: &str) -> Self {
        Self {
            value: Some(name.to_string()),
            writes: 0,
        }
    }

    /// Number of `save` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.value.clone())
    }

    fn save(&mut self, name: &str) -> Result<()> {
        self.value = Some(name.to_string());
        self.writes += 1;
        Ok(())
    }
}
