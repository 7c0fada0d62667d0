//! Suggestion engine: completions for the line being typed.
//!
//! Suggestions are derived from the raw input and the registry on every
//! keystroke; nothing here is cached. The session keeps a
//! [`SuggestionCursor`] for the highlighted row and asks [`Placement`]
//! where to draw the panel.

use crate::interpreter::CommandRegistry;

/// Footer shown under the suggestion rows.
pub const SUGGESTION_FOOTER: &str = "Use Tab/↑↓ to navigate, Enter to select";

/// One candidate completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The full input line after accepting this suggestion.
    pub completion: String,
    pub description: String,
}

impl Suggestion {
    fn new(completion: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            completion: completion.into(),
            description: description.into(),
        }
    }
}

/// Completions for `raw`, first matching rule wins:
///
/// 1. blank input: nothing;
/// 2. unknown command, or the last token starts with `-`: command names
///    starting with the last token;
/// 3. the token before the last is the command's flag: flag values starting
///    with the last token, as full lines;
/// 4. only the command typed so far: the command followed by its flag;
/// 5. otherwise nothing.
///
/// Matching is case-insensitive. Trailing whitespace starts a new, empty
/// token, so `skills --category ` offers every category.
pub fn suggest(registry: &CommandRegistry, raw: &str) -> Vec<Suggestion> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let lowered = raw.trim_start().to_lowercase();
    let mut parts: Vec<&str> = lowered.split_whitespace().collect();
    if lowered.ends_with(char::is_whitespace) {
        parts.push("");
    }
    let cmd_name = parts[0];
    let last = parts[parts.len() - 1];
    let previous = parts.len().checked_sub(2).map(|i| parts[i]);

    let matching = registry.get(cmd_name);
    let Some(cmd) = matching.filter(|_| !last.starts_with('-')) else {
        return registry
            .iter()
            .filter(|c| c.name().starts_with(last))
            .map(|c| Suggestion::new(c.name(), c.description()))
            .collect();
    };

    let Some(flag) = cmd.flag() else {
        return Vec::new();
    };

    if previous == Some(flag.name.as_str()) {
        let head = parts[..parts.len() - 1].join(" ");
        return flag
            .values
            .iter()
            .filter(|v| v.starts_with(last))
            .map(|v| {
                Suggestion::new(
                    format!("{head} {v}"),
                    format!("Set {} to {v}", flag.name),
                )
            })
            .collect();
    }

    if parts.iter().skip(1).all(|p| p.is_empty()) {
        return vec![Suggestion::new(
            format!("{} {}", cmd.name(), flag.name),
            format!("Use {} to filter", flag.name),
        )];
    }

    Vec::new()
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Highlighted row of the suggestion panel.
///
/// Every operation takes the current list length, so the index is always
/// valid for that list (or 0 when it is empty). Up/Down clamp at the ends;
/// Tab wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionCursor {
    index: usize,
}

impl SuggestionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Pull the index back into `0..len`.
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }

    pub fn up(&mut self, len: usize) {
        self.clamp(len);
        self.index = self.index.saturating_sub(1);
    }

    pub fn down(&mut self, len: usize) {
        self.index = (self.index + 1).min(len.saturating_sub(1));
    }

    /// Advance with wrap-around.
    pub fn cycle(&mut self, len: usize) {
        self.index = if len == 0 { 0 } else { (self.index + 1) % len };
    }

    pub fn selected<'a>(&self, items: &'a [Suggestion]) -> Option<&'a Suggestion> {
        items.get(self.index)
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Where the suggestion panel is drawn relative to the input line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    #[default]
    Below,
    Above,
}

impl Placement {
    /// Below unless that does not fit and above has strictly more room.
    pub fn decide(space_above: u16, space_below: u16, panel_height: u16) -> Self {
        if space_below < panel_height && space_above > space_below {
            Self::Above
        } else {
            Self::Below
        }
    }
}

/// Rows the panel occupies: the visible suggestions plus the footer.
pub fn panel_height(count: usize, max_rows: usize) -> u16 {
    let rows = count.min(max_rows);
    u16::try_from(rows + 1).unwrap_or(u16::MAX)
}
