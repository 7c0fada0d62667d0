//! Terminal themes -- color scheme and lookup table.
//!
//! Each theme is a handful of hex colors plus a description shown by the
//! theme picker. The built-in table is loaded from `themes/builtin.toml`.

use serde::Deserialize;

use termfolio_types::backend::Color;
use termfolio_types::error::{Result, TermfolioError};

/// Fixed status colors shared by every theme.
const ERROR_COLOR: Color = Color::rgb(0xf8, 0x71, 0x71);
const SUCCESS_COLOR: Color = Color::rgb(0x4a, 0xde, 0x80);
const WARNING_COLOR: Color = Color::rgb(0xfa, 0xcc, 0x15);

/// Color scheme for the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Theme {
    /// Lowercase theme name, the value of `theme --set`.
    pub name: String,
    /// One-line description for the theme picker.
    #[serde(default)]
    pub description: String,
    /// Main background color.
    pub background: String,
    /// Default text color.
    pub foreground: String,
    /// Input caret color.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Highlight behind the selected suggestion.
    #[serde(default)]
    pub selection: Option<String>,
}

impl Theme {
    /// Parse the background color string to a `Color`.
    pub fn background_color(&self) -> Color {
        Color::from_hex(&self.background).unwrap_or(Color::BLACK)
    }

    /// Parse the foreground color string to a `Color`.
    pub fn foreground_color(&self) -> Color {
        Color::from_hex(&self.foreground).unwrap_or(Color::WHITE)
    }

    /// Parse the cursor color, falling back to the foreground.
    pub fn cursor_color(&self) -> Color {
        self.cursor
            .as_deref()
            .and_then(|c| Color::from_hex(c).ok())
            .unwrap_or_else(|| self.foreground_color())
    }

    /// Parse the selection color, falling back to a translucent foreground.
    pub fn selection_color(&self) -> Color {
        self.selection
            .as_deref()
            .and_then(|c| Color::from_hex(c).ok())
            .unwrap_or_else(|| self.foreground_color().with_alpha(0x4d))
    }

    /// Resolve every color into opaque draw tokens.
    pub fn tokens(&self) -> ThemeTokens {
        let bg = self.background_color();
        let fg = self.foreground_color();
        ThemeTokens {
            background: bg,
            foreground: fg,
            cursor: self.cursor_color(),
            selection: self.selection_color().over(bg),
            dim: fg.with_alpha(0xb3).over(bg),
            faint: fg.with_alpha(0x33).over(bg),
            error: ERROR_COLOR,
            success: SUCCESS_COLOR,
            warning: WARNING_COLOR,
        }
    }
}

/// Opaque colors a backend draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    pub background: Color,
    pub foreground: Color,
    pub cursor: Color,
    pub selection: Color,
    /// Secondary text (hints, descriptions).
    pub dim: Color,
    /// Borders and trail glyphs.
    pub faint: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
    #[serde(rename = "theme")]
    themes: Vec<Theme>,
}

/// Ordered name -> theme lookup table.
#[derive(Debug, Clone)]
pub struct ThemeTable {
    themes: Vec<Theme>,
}

impl ThemeTable {
    /// The embedded built-in themes.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(include_str!("../themes/builtin.toml"))
    }

    /// Parse a table from TOML (`[[theme]]` entries).
    ///
    /// Names are lower-cased; duplicates and an empty table are rejected.
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: ThemeFile = toml::from_str(text)?;
        let mut themes: Vec<Theme> = Vec::with_capacity(file.themes.len());
        for mut theme in file.themes {
            theme.name = theme.name.trim().to_ascii_lowercase();
            if theme.name.is_empty() {
                return Err(TermfolioError::Theme("theme with empty name".to_string()));
            }
            if themes.iter().any(|t| t.name == theme.name) {
                return Err(TermfolioError::Theme(format!(
                    "duplicate theme: {}",
                    theme.name
                )));
            }
            Color::from_hex(&theme.background)?;
            Color::from_hex(&theme.foreground)?;
            themes.push(theme);
        }
        if themes.is_empty() {
            return Err(TermfolioError::Theme("no themes defined".to_string()));
        }
        Ok(Self { themes })
    }

    /// Case-insensitive lookup.
    pub fn find(&self, name: &str) -> Option<&Theme> {
        let name = name.trim();
        self.themes
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Theme names in table order.
    pub fn names(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }

    /// The fallback theme (first entry).
    pub fn fallback(&self) -> &Theme {
        &self.themes[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}
