// src/cache.rs
use std::collections::HashMap;

use crate::model::NormalizedRecord;

/// Per-context record cache keyed by identity. Last write wins, whole-record.
#[derive(Clone, Debug, Default)]
pub struct RecordCache {
    by_key: HashMap<String, NormalizedRecord>,
}

impl RecordCache {
    pub fn new() -> Self { Self::default() }

    /// Insert or overwrite each record under its identity key.
    /// Returns how many keys were new.
    pub fn upsert<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = NormalizedRecord>,
    {
        let mut added = 0;
        for r in records {
            if self.by_key.insert(r.identity_key(), r).is_none() {
                added += 1;
            }
        }
        logd!("cache size: {}", self.by_key.len());
        added
    }

    /// All cached records, in no particular order.
    pub fn snapshot(&self) -> Vec<NormalizedRecord> {
        self.by_key.values().cloned().collect()
    }

    pub fn get(&self, key: &str) -> Option<&NormalizedRecord> { self.by_key.get(key) }
    pub fn len(&self) -> usize { self.by_key.len() }
    pub fn is_empty(&self) -> bool { self.by_key.is_empty() }

    /// Wholesale eviction (context reload / teardown).
    pub fn clear(&mut self) {
        self.by_key.clear();
    }
}
