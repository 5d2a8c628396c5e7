use std::collections::{HashSet, VecDeque};

use crate::common::MessageKey;

/// Set of message keys already shown in the transcript.
///
/// Keys are the full `(text, author, timestamp)` triple, so two distinct
/// messages never collide. With a capacity, the oldest key is forgotten once
/// the set is full, so a long session keeps bounded memory. A forgotten message that the service
/// replays would be shown again; the fetch cursor makes that unlikely.
#[derive(Debug)]
pub struct DedupCache {
    seen: HashSet<MessageKey>,
    order: VecDeque<MessageKey>,
    capacity: Option<usize>,
}

impl DedupCache {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            seen: HashSet::new(),
            order: VecDeque::new(),
            capacity: capacity.filter(|cap| *cap > 0),
        }
    }

    #[cfg(test)]
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Records `key`; returns false when it was already present.
    pub fn insert(&mut self, key: MessageKey) -> bool {
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.insert(key.clone());
        self.order.push_back(key);

        if let Some(capacity) = self.capacity {
            while self.order.len() > capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.seen.remove(&oldest);
                }
            }
        }
        true
    }

    #[cfg(test)]
    pub fn contains(&self, key: &MessageKey) -> bool {
        self.seen.contains(key)
    }

    pub fn clear(&mut self) {
        self.seen.clear();
        self.order.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
