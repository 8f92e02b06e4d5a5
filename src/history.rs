use crate::entry::{HistoryEntry, now_millis};
use std::collections::HashSet;

/// Most-recent-first list of unique texts with a fixed capacity.
#[derive(Debug)]
pub(crate) struct History {
    max_items: usize,
    entries: Vec<HistoryEntry>,
}

impl History {
    pub(crate) fn new(max_items: usize) -> Self {
        Self {
            max_items,
            entries: Vec::new(),
        }
    }

    /// Builds a history from persisted entries, restoring the list
    /// invariants in case the stored data was edited or written with a
    /// larger capacity.
    pub(crate) fn hydrate(max_items: usize, mut entries: Vec<HistoryEntry>) -> Self {
        let mut seen = HashSet::new();
        entries.retain(|entry| !entry.text.is_empty() && seen.insert(entry.text.clone()));
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(max_items);
        Self {
            entries,
            ..Self::new(max_items)
        }
    }

    pub(crate) fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Returns `false` if nothing changed (empty text).
    #[must_use]
    pub(crate) fn record(&mut self, text: &str) -> bool {
        self.record_at(text, now_millis())
    }

    pub(crate) fn record_at(&mut self, text: &str, now: u64) -> bool {
        if text.is_empty() {
            return false;
        }

        // never go below the current front, even if the clock stepped back
        let timestamp = self
            .entries
            .first()
            .map_or(now, |front| front.timestamp.max(now));

        let entry = match self.entries.iter().position(|entry| entry.text == text) {
            Some(pos) => {
                let mut existing = self.entries.remove(pos);
                existing.timestamp = timestamp;
                existing
            }
            None => HistoryEntry::new(text, timestamp),
        };

        self.entries.insert(0, entry);
        self.entries.truncate(self.max_items);
        true
    }

    /// Returns `false` if no entry has this id.
    #[must_use]
    pub(crate) fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
