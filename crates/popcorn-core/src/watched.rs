use popcorn_models::WatchedEntry;
use std::collections::HashSet;

/// The user's watched movies. Ids are unique; mutators return a new list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchedList {
    entries: Vec<WatchedEntry>,
}

impl WatchedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, keeping the first occurrence of each id
    pub fn from_entries(entries: Vec<WatchedEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|e| seen.insert(e.id.clone()))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn user_rating_for(&self, id: &str) -> Option<u8> {
        self.get(id).map(|e| e.user_rating)
    }

    /// Append `entry` unless its id is already present
    pub fn with_added(&self, entry: WatchedEntry) -> Self {
        if self.contains(&entry.id) {
            return self.clone();
        }
        let mut entries = self.entries.clone();
        entries.push(entry);
        Self { entries }
    }

    pub fn without(&self, id: &str) -> Self {
        Self {
            entries: self.entries.iter().filter(|e| e.id != id).cloned().collect(),
        }
    }
}
