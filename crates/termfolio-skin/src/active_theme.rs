//! The single runtime slot holding the current theme.
//!
//! `ActiveTheme` is initialised once from the preference store and changed
//! only through [`ActiveTheme::apply`], which also persists the choice.
//! Consumers receive `&ActiveTheme` (or its tokens) instead of reading any
//! global.

use termfolio_types::error::{Result, TermfolioError};

use crate::store::ThemeStore;
use crate::theme::{Theme, ThemeTable, ThemeTokens};

/// Runtime theme plus its resolved draw tokens.
#[derive(Debug, Clone)]
pub struct ActiveTheme {
    theme: Theme,
    tokens: ThemeTokens,
}

impl ActiveTheme {
    /// Wrap a theme without touching any store.
    pub fn new(theme: &Theme) -> Self {
        Self {
            tokens: theme.tokens(),
            theme: theme.clone(),
        }
    }

    /// Resolve the start-up theme.
    ///
    /// Order: `explicit` (CLI / env), the stored preference, `default_name`,
    /// then the table's fallback. Unknown or unreadable values are skipped
    /// with a warning.
    pub fn init(
        table: &ThemeTable,
        store: &dyn ThemeStore,
        explicit: Option<&str>,
        default_name: &str,
    ) -> Self {
        let stored = match store.load() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Could not read theme preference: {e}");
                None
            },
        };

        let candidates = [explicit.map(str::to_string), stored, Some(default_name.to_string())];
        for name in candidates.iter().flatten() {
            match table.find(name) {
                Some(theme) => return Self::new(theme),
                None => log::warn!("Theme '{name}' not found -- skipping"),
            }
        }
        Self::new(table.fallback())
    }

    /// Switch to `name` and persist it.
    ///
    /// The in-memory theme changes only when the name resolves. A failed
    /// write is returned after the switch so the caller can report it.
    pub fn apply(
        &mut self,
        table: &ThemeTable,
        store: &mut dyn ThemeStore,
        name: &str,
    ) -> Result<&Theme> {
        let theme = table
            .find(name)
            .ok_or_else(|| TermfolioError::Theme(format!("unknown theme: {name}")))?;
        *self = Self::new(theme);
        log::info!("Theme set to '{}'", self.theme.name);
        store.save(&self.theme.name)?;
        Ok(&self.theme)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn name(&self) -> &str {
        &self.theme.name
    }

    pub fn tokens(&self) -> &ThemeTokens {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileThemeStore, MemoryThemeStore};

    fn table() -> ThemeTable {
        ThemeTable::builtin().unwrap()
    }

    #[test]
    fn init_without_preference_uses_default() {
        let store = MemoryThemeStore::new();
        let active = ActiveTheme::init(&table(), &store, None, "retro");
        assert_eq!(active.name(), "retro");
    }

    #[test]
    fn init_prefers_stored_over_default() {
        let store = MemoryThemeStore::with_value("midnight");
        let active = ActiveTheme::init(&table(), &store, None, "retro");
        assert_eq!(active.name(), "midnight");
    }

    #[test]
    fn init_prefers_explicit_over_stored() {
        let store = MemoryThemeStore::with_value("midnight");
        let active = ActiveTheme::init(&table(), &store, Some("cyberpunk"), "retro");
        assert_eq!(active.name(), "cyberpunk");
    }

    #[test]
    fn init_skips_unrecognized_stored_value() {
        let store = MemoryThemeStore::with_value("solarized");
        let active = ActiveTheme::init(&table(), &store, None, "retro");
        assert_eq!(active.name(), "retro");
    }

    #[test]
    fn init_falls_back_to_first_theme() {
        let store = MemoryThemeStore::with_value("nope");
        let active = ActiveTheme::init(&table(), &store, Some("nada"), "zilch");
        assert_eq!(active.name(), "matrix");
    }

    #[test]
    fn apply_persists_and_switches() {
        let t = table();
        let mut store = MemoryThemeStore::new();
        let mut active = ActiveTheme::init(&t, &store, None, "matrix");
        active.apply(&t, &mut store, "Cyberpunk").unwrap();
        assert_eq!(active.name(), "cyberpunk");
        assert_eq!(store.load().unwrap().as_deref(), Some("cyberpunk"));
        assert_eq!(active.tokens(), &t.find("cyberpunk").unwrap().tokens());
    }

    #[test]
    fn apply_unknown_leaves_state_untouched() {
        let t = table();
        let mut store = MemoryThemeStore::new();
        let mut active = ActiveTheme::init(&t, &store, None, "matrix");
        assert!(active.apply(&t, &mut store, "bogus").is_err());
        assert_eq!(active.name(), "matrix");
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn apply_twice_is_idempotent() {
        let t = table();
        let mut store = MemoryThemeStore::new();
        let mut active = ActiveTheme::init(&t, &store, None, "retro");
        active.apply(&t, &mut store, "matrix").unwrap();
        let once = store.load().unwrap();
        active.apply(&t, &mut store, "matrix").unwrap();
        assert_eq!(store.load().unwrap(), once);
        assert_eq!(active.name(), "matrix");
    }

    #[test]
    fn preference_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        let t = table();
        let mut store = FileThemeStore::new(&path);
        let mut active = ActiveTheme::init(&t, &store, None, "matrix");
        active.apply(&t, &mut store, "cyberpunk").unwrap();

        let reloaded = ActiveTheme::init(&t, &FileThemeStore::new(&path), None, "matrix");
        assert_eq!(reloaded.name(), "cyberpunk");
    }
}
