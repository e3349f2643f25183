//! Priority queue with statistics collection.

use std::fmt;
use std::hash::BuildHasherDefault;

use ::priority_queue::PriorityQueue as IndexedHeap;
use rustc_hash::FxHasher;
use sugars::boxed;

use crate::clock::Clock;
use crate::config::QueueConfig;
use crate::item::Identity;
use crate::priority::{EntryKey, PriorityEntry};
use crate::stats::QueueStats;
use crate::util::generate_name;
use crate::{log_debug, log_trace};

type PriorityFn<T> = Box<dyn Fn(&T) -> f64>;
type Callback<T> = Box<dyn FnMut(&T)>;
type EntryHeap<T> = IndexedHeap<PriorityEntry<T>, EntryKey, BuildHasherDefault<FxHasher>>;

/// A priority queue which tracks entry times of items and collects [statistics](QueueStats).
///
/// Items are dequeued in the order of their priority: lower value means higher priority.
/// Items with equal priorities are dequeued in the order they were enqueued.
///
/// Priorities are computed by the priority function set with [`with_priority_fn`](Self::with_priority_fn)
/// or passed explicitly to [`enqueue_with_priority`](Self::enqueue_with_priority). Without a priority function
/// all items get the default priority (0 unless configured otherwise), i.e. the queue works as FIFO.
///
/// Entries are kept in an indexed binary heap keyed by insertion sequence numbers, so that an entry found by
/// [`remove`](Self::remove) or [`update_priority`](Self::update_priority) is taken out of the heap in logarithmic
/// time. Finding the entry itself requires a linear scan.
///
/// # Examples
///
/// ```rust
/// use simcraft_queues::{PriorityQueue, SimulationClock};
///
/// let clock = SimulationClock::new();
/// let mut queue = PriorityQueue::new(clock.clone(), 0).with_priority_fn(|job: &(char, f64)| job.1);
/// queue.enqueue(('a', 5.));
/// queue.enqueue(('b', 1.));
/// queue.enqueue_with_priority(('c', 5.), 0.5);
///
/// assert_eq!(queue.dequeue(), Some(('c', 5.)));
/// assert_eq!(queue.dequeue(), Some(('b', 1.)));
/// assert_eq!(queue.dequeue(), Some(('a', 5.)));
/// ```
pub struct PriorityQueue<T> {
    name: String,
    capacity: usize,
    heap: EntryHeap<T>,
    next_seq: u64,
    priority_fn: PriorityFn<T>,
    stats: QueueStats,
    clock: Box<dyn Clock>,
    on_enqueue: Option<Callback<T>>,
    on_dequeue: Option<Callback<T>>,
}

impl<T> PriorityQueue<T> {
    /// Creates a queue with specified capacity (0 = unlimited), generated name and zero default priority.
    pub fn new(clock: impl Clock + 'static, capacity: usize) -> Self {
        Self {
            name: generate_name("PriorityQueue"),
            capacity,
            heap: EntryHeap::with_default_hasher(),
            next_seq: 0,
            priority_fn: boxed!(|_: &T| 0.),
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
            panic!("Can't create priority queue: {}", e);
        }
        let default_priority = config.default_priority;
        let queue = Self::new(clock, config.capacity).with_priority_fn(move |_: &T| default_priority);
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

    /// Sets the function computing priorities of enqueued items.
    pub fn with_priority_fn<F: Fn(&T) -> f64 + 'static>(mut self, priority_fn: F) -> Self {
        self.priority_fn = Box::new(priority_fn);
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
        self.heap.len()
    }

    /// Checks if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Checks if the queue is bounded and holds `capacity` items.
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.heap.len() >= self.capacity
    }

    /// Sets the callback invoked after an item is successfully enqueued.
    pub fn on_enqueue<F: FnMut(&T) + 'static>(&mut self, callback: F) {
        self.on_enqueue = Some(Box::new(callback));
    }

    /// Sets the callback invoked when an item is dequeued (but not removed with [`remove`](Self::remove)).
    pub fn on_dequeue<F: FnMut(&T) + 'static>(&mut self, callback: F) {
        self.on_dequeue = Some(Box::new(callback));
    }

    /// Adds item with the priority computed by the priority function.
    ///
    /// Returns `false` and leaves the queue unchanged if the queue is full.
    pub fn enqueue(&mut self, item: T) -> bool {
        self.push(item, None)
    }

    /// Adds item with the specified priority, bypassing the priority function.
    ///
    /// Returns `false` and leaves the queue unchanged if the queue is full.
    pub fn enqueue_with_priority(&mut self, item: T, priority: f64) -> bool {
        self.push(item, Some(priority))
    }

    fn push(&mut self, item: T, priority: Option<f64>) -> bool {
        if self.is_full() {
            log_debug!(self, "rejected item, queue is full ({} items)", self.heap.len());
            return false;
        }
        let priority = priority.unwrap_or_else(|| (self.priority_fn)(&item));
        let time = self.clock.time();
        let seq = self.next_seq();
        let entry = PriorityEntry::new(item, priority, seq, time);
        let key = entry.key();
        self.heap.push(entry, key);
        self.stats.record_entry(time);
        log_trace!(
            self,
            "enqueued item #{} with priority {}, length {}",
            seq,
            priority,
            self.heap.len()
        );
        if let (Some(callback), Some((entry, _))) = (self.on_enqueue.as_mut(), self.heap.get(&seq)) {
            callback(entry.item());
        }
        true
    }

    /// Removes and returns the item with the highest priority (lowest priority value).
    pub fn dequeue(&mut self) -> Option<T> {
        let (entry, _) = self.heap.pop()?;
        let time = self.clock.time();
        let wait_time = time - entry.entry_time();
        self.stats.record_exit(time, wait_time);
        log_trace!(
            self,
            "dequeued item #{} after waiting {:.3}, length {}",
            entry.seq(),
            wait_time,
            self.heap.len()
        );
        if let Some(callback) = self.on_dequeue.as_mut() {
            callback(entry.item());
        }
        Some(entry.into_item())
    }

    /// Returns the item with the highest priority without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|(entry, _)| entry.item())
    }

    /// Resets the statistics while keeping the queued items.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.stats.sync_length(self.heap.len());
        log_debug!(self, "statistics reset with {} queued items", self.heap.len());
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    // Among the entries satisfying the predicate returns the one which would be dequeued first.
    fn first_matching<F>(&self, pred: F) -> Option<u64>
    where
        F: Fn(&PriorityEntry<T>) -> bool,
    {
        self.heap
            .iter()
            .filter(|(entry, _)| pred(entry))
            .map(|(_, key)| *key)
            .max()
            .map(|key| key.seq)
    }
}

impl<T: Identity + PartialEq> PriorityQueue<T> {
    fn find_entry(&self, item: &T) -> Option<u64> {
        self.first_matching(|entry| entry.item().is_same(item))
            .or_else(|| self.first_matching(|entry| entry.item() == item))
    }

    /// Removes the specified item.
    ///
    /// The item which is the same object as `item` is removed if there is one, otherwise an item equal to it
    /// (see [`Identity`]). If several items match, the one with the highest priority is removed.
    /// Returns `false` if nothing matches.
    pub fn remove(&mut self, item: &T) -> bool {
        let seq = match self.find_entry(item) {
            Some(seq) => seq,
            None => return false,
        };
        let (entry, _) = match self.heap.remove(&seq) {
            Some(removed) => removed,
            None => return false,
        };
        let time = self.clock.time();
        let wait_time = time - entry.entry_time();
        self.stats.record_exit(time, wait_time);
        log_debug!(
            self,
            "removed item #{} after waiting {:.3}, length {}",
            seq,
            wait_time,
            self.heap.len()
        );
        true
    }

    /// Changes the priority of the specified item, matched as in [`remove`](Self::remove).
    ///
    /// The item is placed after the items already queued with the same priority. Its entry time is kept,
    /// so the waiting time is still counted from the moment it was enqueued.
    /// Returns `false` and leaves the queue unchanged if nothing matches.
    pub fn update_priority(&mut self, item: &T, new_priority: f64) -> bool {
        let seq = match self.find_entry(item) {
            Some(seq) => seq,
            None => return false,
        };
        let (entry, old_key) = match self.heap.remove(&seq) {
            Some(removed) => removed,
            None => return false,
        };
        let new_seq = self.next_seq();
        let entry = entry.reprioritized(new_priority, new_seq);
        let key = entry.key();
        self.heap.push(entry, key);
        log_debug!(
            self,
            "changed priority of item #{} from {} to {} (now #{})",
            seq,
            old_key.priority,
            new_priority,
            new_seq
        );
        true
    }

    /// Returns the priority of the specified item, matched as in [`remove`](Self::remove).
    pub fn priority_of(&self, item: &T) -> Option<f64> {
        let seq = self.find_entry(item)?;
        self.heap.get_priority(&seq).map(|key| key.priority)
    }
}

impl<T> fmt::Display for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PriorityQueue(name={:?}, length={}, capacity={})",
            self.name,
            self.heap.len(),
            self.capacity
        )
    }
}
