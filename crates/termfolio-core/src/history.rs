//! Scrollback history.

use termfolio_terminal::ContentBlock;

/// One submitted line and what it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Stable id, unique for the lifetime of the store.
    pub id: u64,
    /// The line as typed. Empty for system-generated entries.
    pub input: String,
    pub output: Option<ContentBlock>,
}

/// Ordered, append-only log of entries. The only other mutation is
/// [`HistoryStore::clear`], which drops everything at once.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its id.
    pub fn push(&mut self, input: impl Into<String>, output: Option<ContentBlock>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(HistoryEntry {
            id,
            input: input.into(),
            output,
        });
        id
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
