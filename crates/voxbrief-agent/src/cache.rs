// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript cache backing "shorter" follow-ups.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Entries {
    texts: HashMap<i64, String>,
    // Insertion order, tracked only when bounded.
    order: VecDeque<i64>,
}

/// Message id to transcript text, shared by every job.
///
/// Unbounded unless `max_entries` is set, in which case the oldest insert is
/// evicted first. The lock is held only for map operations.
#[derive(Debug, Default)]
pub struct TranscriptCache {
    entries: Mutex<Entries>,
    max_entries: Option<usize>,
}

impl TranscriptCache {
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(Entries::default()),
            max_entries,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Stores `text` under `message_id`, replacing any previous value.
    pub fn put(&self, message_id: i64, text: impl Into<String>) {
        let mut entries = self.lock();
        let fresh = entries.texts.insert(message_id, text.into()).is_none();

        let Some(max) = self.max_entries else {
            return;
        };
        if fresh {
            entries.order.push_back(message_id);
        }
        while entries.texts.len() > max {
            match entries.order.pop_front() {
                Some(oldest) => {
                    entries.texts.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn get(&self, message_id: i64) -> Option<String> {
        self.lock().texts.get(&message_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // Every update is a single map operation, so a poisoned map is intact.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn put_then_get_round_trips() {
        let cache = TranscriptCache::unbounded();
        cache.put(17, "привет мир");
        assert_eq!(cache.get(17).as_deref(), Some("привет мир"));
        assert!(cache.get(18).is_none());
    }

    #[test]
    fn put_replaces_existing_value() {
        let cache = TranscriptCache::unbounded();
        cache.put(1, "old");
        cache.put(1, "new");
        assert_eq!(cache.get(1).as_deref(), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn bounded_cache_evicts_oldest_insert() {
        let cache = TranscriptCache::new(Some(2));
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(1, "a2");
        cache.put(3, "c");
        assert!(cache.get(1).is_none());
        assert_eq!(cache.get(2).as_deref(), Some("b"));
        assert_eq!(cache.get(3).as_deref(), Some("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn unbounded_cache_keeps_everything() {
        let cache = TranscriptCache::unbounded();
        for id in 0..1000 {
            cache.put(id, id.to_string());
        }
        assert_eq!(cache.len(), 1000);
        assert_eq!(cache.get(0).as_deref(), Some("0"));
    }

    #[test]
    fn concurrent_writers_and_readers() {
        let cache = Arc::new(TranscriptCache::unbounded());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let id = t * 100 + i;
                        cache.put(id, format!("text-{id}"));
                        assert_eq!(cache.get(id), Some(format!("text-{id}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 800);
    }
}
