//! First-in-first-out queue with statistics collection.

use std::collections::VecDeque;
use std::fmt;

use crate::clock::Clock;
use crate::config::QueueConfig;
use crate::item::{find_position, Identity};
use crate::stats::QueueStats;
use crate::util::generate_name;
use crate::{log_debug, log_trace};

/// Queued item along with the time it entered the queue.
struct QueueEntry<T> {
    item: T,
    entry_time: f64,
}

impl<T> QueueEntry<T> {
    fn new(item: T, entry_time: f64) -> Self {
        Self { item, entry_time }
    }
}

type Callback<T> = Box<dyn FnMut(&T)>;

/// A FIFO queue which tracks entry times of items and collects [statistics](QueueStats).
///
/// The queue can be bounded by capacity, in this case [`enqueue`](Self::enqueue) rejects items
/// when the queue is full. Capacity 0 means the queue is unbounded.
///
/// # Examples
///
/// ```rust
/// use simcraft_queues::{Queue, SimulationClock};
///
/// let clock = SimulationClock::new();
/// let mut queue = Queue::new(clock.clone(), 2).with_name("waiting-room");
/// assert!(queue.enqueue("alice"));
/// assert!(queue.enqueue("bob"));
/// assert!(!queue.enqueue("carol"));
///
/// clock.advance(3.);
/// assert_eq!(queue.dequeue(), Some("alice"));
/// assert_eq!(queue.stats().average_wait(), 3.);
/// assert_eq!(queue.to_string(), "Queue(name=\"waiting-room\", length=1, capacity=2)");
/// ```
pub struct Queue<T> {
    name: String,
    capacity: usize,
    entries: VecDeque<QueueEntry<T>>,
    stats: QueueStats,
    clock: Box<dyn Clock>,
    on_enqueue: Option<Callback<T>>,
    on_dequeue: Option<Callback<T>>,
}

impl<T> Queue<T> {
    /// Creates a queue with specified capacity (0 = unlimited) and generated name.
    pub fn new(clock: impl Clock + 'static, capacity: usize) -> Self {
        Self {
            name: generate_name("Queue"),
            capacity,
            entries: VecDeque::new(),
            stats: QueueStats::new(),
            clock: Box::new(clock),
            on_enqueue: None,
            on_dequeue: None,
        }
    }

    /// Creates a queue from config.
    ///
    /// Panics if the config is invalid, see [`QueueConfig::validate`].
    pub fn from_config(clock: impl Clock + 'static, config: &QueueConfig) -> Self {
        if let Err(e) = config.validate() {
            panic!("Can't create queue: {}", e);
        }
        let queue = Self::new(clock, config.capacity);
        match &config.name {
            Some(name) => queue.with_name(name),
            None => queue,
        }
    }

    /// Sets the queue name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Returns the queue name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the queue capacity (0 = unlimited).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current time of the queue clock.
    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    /// Returns the collected statistics.
    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks if the queue is bounded and holds `capacity` items.
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.entries.len() >= self.capacity
    }

    /// Sets the callback invoked after an item is successfully enqueued.
    ///
    /// Replaces the previously set callback.
    pub fn on_enqueue<F: FnMut(&T) + 'static>(&mut self, callback: F) {
        self.on_enqueue = Some(Box::new(callback));
    }

    /// Sets the callback invoked when an item is dequeued.
    ///
    /// Replaces the previously set callback. The callback is also invoked for items returned by
    /// [`clear`](Self::clear), but not for items taken out by [`remove`](Self::remove).
    pub fn on_dequeue<F: FnMut(&T) + 'static>(&mut self, callback: F) {
        self.on_dequeue = Some(Box::new(callback));
    }

    /// Adds item to the tail of the queue.
    ///
    /// Returns `false` and leaves the queue unchanged if the queue is full.
    pub fn enqueue(&mut self, item: T) -> bool {
        if self.is_full() {
            log_debug!(self, "rejected item, queue is full ({} items)", self.entries.len());
            return false;
        }
        let time = self.clock.time();
        self.entries.push_back(QueueEntry::new(item, time));
        self.stats.record_entry(time);
        log_trace!(self, "enqueued item, length {}", self.entries.len());
        if let (Some(callback), Some(entry)) = (self.on_enqueue.as_mut(), self.entries.back()) {
            callback(&entry.item);
        }
        true
    }

    /// Removes and returns the item at the head of the queue.
    pub fn dequeue(&mut self) -> Option<T> {
        let entry = self.entries.pop_front()?;
        let time = self.clock.time();
        let wait_time = time - entry.entry_time;
        self.stats.record_exit(time, wait_time);
        log_trace!(
            self,
            "dequeued item after waiting {:.3}, length {}",
            wait_time,
            self.entries.len()
        );
        if let Some(callback) = self.on_dequeue.as_mut() {
            callback(&entry.item);
        }
        Some(entry.item)
    }

    /// Returns the item at the head of the queue without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.entries.front().map(|entry| &entry.item)
    }

    /// Removes all items and returns them in the queue order.
    ///
    /// Each item is dequeued in turn, so that statistics account for every departure.
    pub fn clear(&mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.entries.len());
        while let Some(item) = self.dequeue() {
            items.push(item);
        }
        log_debug!(self, "cleared {} items", items.len());
        items
    }

    /// Resets the statistics while keeping the queued items.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.stats.sync_length(self.entries.len());
        log_debug!(self, "statistics reset with {} queued items", self.entries.len());
    }

    /// Returns an iterator over the queued items from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

impl<T: Identity + PartialEq> Queue<T> {
    /// Removes the specified item from any position of the queue.
    ///
    /// The item which is the same object as `item` is removed if there is one, otherwise the first item
    /// equal to it (see [`Identity`]). Returns `false` if nothing matches.
    pub fn remove(&mut self, item: &T) -> bool {
        let pos = match find_position(self.iter(), item) {
            Some(pos) => pos,
            None => return false,
        };
        let entry = match self.entries.remove(pos) {
            Some(entry) => entry,
            None => return false,
        };
        let time = self.clock.time();
        let wait_time = time - entry.entry_time;
        self.stats.record_exit(time, wait_time);
        log_debug!(
            self,
            "removed item at position {} after waiting {:.3}, length {}",
            pos,
            wait_time,
            self.entries.len()
        );
        true
    }

    /// Checks if the queue holds the specified item, using the same matching as [`remove`](Self::remove).
    pub fn contains(&self, item: &T) -> bool {
        find_position(self.iter(), item).is_some()
    }
}

impl<T> fmt::Display for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Queue(name={:?}, length={}, capacity={})",
            self.name,
            self.entries.len(),
            self.capacity
        )
    }
}

/// Iterator over the items of [`Queue`] from head to tail.
pub struct Iter<'a, T> {
    inner: std::collections::vec_deque::Iter<'a, QueueEntry<T>>,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| &entry.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| &entry.item)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
