//! Runtime configuration.
//!
//! Loaded from a TOML file. Every field has a default, so an empty file (or
//! no file at all) yields a working configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TERMFOLIO_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TermfolioConfig {
    pub terminal: TerminalConfig,
    pub theme: ThemeConfig,
    pub game: GameConfig,
    pub matrix: MatrixConfig,
    pub content: ContentConfig,
}

/// Prompt, welcome text, and timing of the terminal view.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Prompt glyph shown before the input line.
    pub prompt: String,
    /// Welcome message typed out at session start.
    pub welcome: String,
    /// Milliseconds between welcome reveal ticks.
    pub welcome_interval_ms: u32,
    /// Milliseconds between reveal ticks of renderer intros.
    pub intro_interval_ms: u32,
    /// Delay before any typing effect starts.
    pub typing_delay_ms: u32,
    /// Characters revealed per tick.
    pub chars_per_tick: usize,
    /// Event-loop tick length.
    pub frame_ms: u32,
    /// Maximum rows the suggestion panel may show.
    pub max_suggestions: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt: "$".to_string(),
            welcome: "Welcome to my portfolio terminal.\nType \"help\" to see available commands."
                .to_string(),
            welcome_interval_ms: 40,
            intro_interval_ms: 30,
            typing_delay_ms: 200,
            chars_per_tick: 1,
            frame_ms: 16,
            max_suggestions: 8,
        }
    }
}

/// Theme selection and preference storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Theme used when no preference is stored.
    pub default: String,
    /// Preference file override.
    pub store: Option<PathBuf>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: "matrix".to_string(),
            store: None,
        }
    }
}

/// Snake game settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: u16,
    pub speed_ms: u32,
    /// Clear the scrollback when the player leaves the game.
    pub clear_on_exit: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            speed_ms: 100,
            clear_on_exit: false,
        }
    }
}

/// Matrix rain settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    pub frame_ms: u32,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self { frame_ms: 50 }
    }
}

/// Where portfolio content comes from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Portfolio TOML override. `None` uses the embedded document.
    pub path: Option<PathBuf>,
}

impl TermfolioConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `$TERMFOLIO_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
