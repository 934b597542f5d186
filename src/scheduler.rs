//! Coalescing scheduler: a key-deduplicated deferred work queue.
//!
//! One abstraction serves both deferral points in the runtime — the frame
//! queue (deferred dynamic node updates, flushed once per animation-frame
//! tick) and the store's notification queue (changed state keys, flushed once
//! per tick). The two differ only in payload type and in who triggers the
//! flush; the dedup/ordering rules live here once.
//!
//! Guarantees:
//! - `enqueue` never runs anything synchronously.
//! - Entries drain in first-enqueue order, each exactly once per flush.
//! - Re-enqueueing an existing key replaces its payload but keeps its slot in
//!   the order, so repeated requests within one window collapse into one.

use std::collections::HashMap;
use std::hash::Hash;

/// Insertion-ordered, key-deduplicated queue of deferred work.
pub struct Coalescer<K, V> {
    order: Vec<K>,
    entries: HashMap<K, V>,
    scheduled: bool,
}

impl<K: Clone + Eq + Hash, V> Coalescer<K, V> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
            scheduled: false,
        }
    }

    /// Queue `value` under `key`.
    ///
    /// Returns `true` exactly when a flush became newly pending — the caller
    /// uses this to arm its flush trigger once per window. A key already in
    /// the queue keeps its position; only its payload is replaced.
    pub fn enqueue(&mut self, key: K, value: V) -> bool {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
        if self.scheduled {
            false
        } else {
            self.scheduled = true;
            true
        }
    }

    /// Drain every pending entry in first-enqueue order and clear the
    /// scheduled flag. Work enqueued after this call belongs to the next
    /// window.
    pub fn drain(&mut self) -> Vec<(K, V)> {
        self.scheduled = false;
        let order = std::mem::take(&mut self.order);
        let mut entries = std::mem::take(&mut self.entries);
        order
            .into_iter()
            .filter_map(|key| {
                let value = entries.remove(&key)?;
                Some((key, value))
            })
            .collect()
    }

    /// Whether a flush is currently pending.
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Number of distinct pending keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K: Clone + Eq + Hash, V> Default for Coalescer<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
