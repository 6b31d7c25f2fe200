// Bounded activity history, most recent first.

use std::collections::VecDeque;

use crate::models::HistoryItem;

/// How many entries the activity panel keeps.
pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    items: VecDeque<HistoryItem>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front and drop anything beyond the capacity.
    /// Ordering is by insertion, not by timestamp.
    pub fn append(&mut self, item: HistoryItem) {
        self.items.push_front(item);
        self.items.truncate(HISTORY_CAPACITY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&HistoryItem> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
