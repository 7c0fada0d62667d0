//! Theme system -- the color personality of the terminal.
//!
//! A theme is a named set of style tokens loaded from TOML. The built-in
//! table is embedded at compile time. The user's choice is persisted through
//! a [`ThemeStore`] and held at runtime in the single [`ActiveTheme`] slot.

pub mod active_theme;
pub mod store;
pub mod theme;

pub use active_theme::ActiveTheme;
pub use store::{FileThemeStore, MemoryThemeStore, ThemeStore};
pub use theme::{Theme, ThemeTable, ThemeTokens};
