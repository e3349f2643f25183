//! Queue statistics.

use log::error;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Epsilon to compare floating point time values.
pub const EPSILON: f64 = 1e-12;

/// Statistics collected by a queue.
///
/// Besides the entry and exit counters it maintains the time-weighted integral of the queue length
/// ("area"), which is extended on every entry or exit by the current length multiplied by the time
/// passed since the previous change.
///
/// The serialized form holds all counters along with the average length and the average wait.
#[derive(Clone, Debug, Default)]
pub struct QueueStats {
    entries: u64,
    exits: u64,
    max_length: usize,
    total_wait_time: f64,
    area: f64,
    last_change_time: f64,
    current_length: usize,
}

impl QueueStats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an item entering the queue at the specified time.
    pub fn record_entry(&mut self, time: f64) {
        self.update_area(time);
        self.entries += 1;
        self.current_length += 1;
        self.max_length = self.max_length.max(self.current_length);
    }

    /// Records an item leaving the queue at the specified time after waiting for `wait_time`.
    pub fn record_exit(&mut self, time: f64, wait_time: f64) {
        self.update_area(time);
        debug_assert!(self.current_length > 0, "exit recorded for an empty queue");
        self.current_length -= 1;
        self.exits += 1;
        self.total_wait_time += wait_time;
    }

    fn update_area(&mut self, time: f64) {
        if time < self.last_change_time - EPSILON {
            error!(
                target: "stats",
                "[{:.3} {} stats] Queue state changed in the past at {:.3}",
                self.last_change_time,
                crate::log::get_colored("ERROR", colored::Color::Red),
                time
            );
            panic!("Queue statistics can not be updated with time going backwards.");
        }
        let time = time.max(self.last_change_time);
        self.area += self.current_length as f64 * (time - self.last_change_time);
        self.last_change_time = time;
    }

    /// Clears all counters, the area and the last change time.
    ///
    /// The owning queue must call [`sync_length`](Self::sync_length) right after this method,
    /// otherwise a non-empty queue would be reported as empty.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sets the current length to the actual number of queued items.
    ///
    /// The maximum length is raised accordingly.
    pub fn sync_length(&mut self, length: usize) {
        self.current_length = length;
        self.max_length = self.max_length.max(length);
    }

    /// Returns the total number of entries.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Returns the total number of exits.
    pub fn exits(&self) -> u64 {
        self.exits
    }

    /// Returns the maximum observed queue length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns the sum of waiting times of all departed items.
    pub fn total_wait_time(&self) -> f64 {
        self.total_wait_time
    }

    /// Returns the time-weighted queue length integral up to the last change.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Returns the time of the last entry or exit.
    pub fn last_change_time(&self) -> f64 {
        self.last_change_time
    }

    /// Returns the current queue length.
    pub fn current_length(&self) -> usize {
        self.current_length
    }

    /// Returns the time-average queue length up to the last change.
    ///
    /// Assumes that the time starts from 0.
    pub fn average_length(&self) -> f64 {
        if self.last_change_time == 0. {
            return 0.;
        }
        self.area / self.last_change_time
    }

    /// Returns the time-average queue length up to the specified time.
    ///
    /// The current length is assumed to hold from the last change until `time`.
    pub fn average_length_at(&self, time: f64) -> f64 {
        let time = time.max(self.last_change_time);
        if time == 0. {
            return 0.;
        }
        let area = self.area + self.current_length as f64 * (time - self.last_change_time);
        area / time
    }

    /// Returns the average waiting time of departed items.
    pub fn average_wait(&self) -> f64 {
        if self.exits == 0 {
            return 0.;
        }
        self.total_wait_time / self.exits as f64
    }
}

impl Serialize for QueueStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("QueueStats", 9)?;
        state.serialize_field("entries", &self.entries)?;
        state.serialize_field("exits", &self.exits)?;
        state.serialize_field("max_length", &self.max_length)?;
        state.serialize_field("current_length", &self.current_length)?;
        state.serialize_field("total_wait_time", &self.total_wait_time)?;
        state.serialize_field("area", &self.area)?;
        state.serialize_field("last_change_time", &self.last_change_time)?;
        state.serialize_field("average_length", &self.average_length())?;
        state.serialize_field("average_wait", &self.average_wait())?;
        state.end()
    }
}
