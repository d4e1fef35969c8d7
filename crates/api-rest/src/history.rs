//! In-memory per-user analysis history.
//!
//! History lives only for the lifetime of the process. It is owned by the HTTP layer; the
//! classifier core never sees it.

use crate::schemas::HistoryEntry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct HistoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<HistoryEntry>>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to a user's history.
    pub fn record(&self, user_id: &str, entry: HistoryEntry) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(user_id.to_string())
            .or_default()
            .push(entry);
    }

    /// A user's entries in insertion order; empty for unknown users.
    pub fn entries(&self, user_id: &str) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }
}
