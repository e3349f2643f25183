//! Ordering of priority queue items.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Ordering key of a priority queue item: priority value and insertion sequence number.
///
/// Lower priority values go first, items with equal priorities go in the insertion order.
/// Priorities are compared using the IEEE total order, so that NaN values can not break the heap.
///
/// Note that the `Ord` implementation is inverted (the key which goes first is the greatest)
/// to be used with max-heaps.
#[derive(Clone, Copy, Debug)]
pub struct EntryKey {
    /// Priority value.
    pub priority: f64,
    /// Insertion sequence number, unique within a queue.
    pub seq: u64,
}

impl EntryKey {
    /// Creates a new key.
    pub fn new(priority: f64, seq: u64) -> Self {
        Self { priority, seq }
    }
}

impl PartialEq for EntryKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EntryKey {}

impl Ord for EntryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for EntryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue item along with its ordering key and the time it entered the queue.
///
/// Entries are identified by the sequence number: equality and hashing use only the sequence number,
/// which is unique within a queue, and the entries can be looked up by it. The item itself is not
/// required to be comparable or hashable.
pub struct PriorityEntry<T> {
    key: EntryKey,
    item: T,
    entry_time: f64,
}

impl<T> PriorityEntry<T> {
    /// Creates a new entry.
    pub fn new(item: T, priority: f64, seq: u64, entry_time: f64) -> Self {
        Self {
            key: EntryKey::new(priority, seq),
            item,
            entry_time,
        }
    }

    /// Returns the ordering key.
    pub fn key(&self) -> EntryKey {
        self.key
    }

    /// Returns the priority value.
    pub fn priority(&self) -> f64 {
        self.key.priority
    }

    /// Returns the insertion sequence number.
    pub fn seq(&self) -> u64 {
        self.key.seq
    }

    /// Returns the wrapped item.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Returns the time the item entered the queue.
    pub fn entry_time(&self) -> f64 {
        self.entry_time
    }

    /// Unwraps the item.
    pub fn into_item(self) -> T {
        self.item
    }

    /// Re-creates the entry with new priority and sequence number, keeping the item and entry time.
    pub fn reprioritized(self, priority: f64, seq: u64) -> Self {
        Self::new(self.item, priority, seq, self.entry_time)
    }
}

impl<T> PartialEq for PriorityEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key.seq == other.key.seq
    }
}

impl<T> Eq for PriorityEntry<T> {}

impl<T> Hash for PriorityEntry<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.seq.hash(state);
    }
}

impl<T> Borrow<u64> for PriorityEntry<T> {
    fn borrow(&self) -> &u64 {
        &self.key.seq
    }
}

impl<T> PartialOrd for PriorityEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for PriorityEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
