use chrono::Local;
use std::collections::VecDeque;

/// Wall-clock format of history timestamps, e.g. `14:03:27`.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub result: String,
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn new(result: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Entry stamped with the current local time.
    pub fn stamped_now(result: impl Into<String>) -> Self {
        Self::new(result, Local::now().format(TIMESTAMP_FORMAT).to_string())
    }
}

/// Past results, most recent first. Never trimmed.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
