#![warn(missing_docs)]
#![doc = include_str!("../readme.md")]

pub mod clock;
pub mod config;
pub mod fifo;
pub mod item;
pub mod log;
pub mod priority;
pub mod priority_queue;
pub mod stats;
mod util;


pub use colored;
pub use clock::{Clock, SimulationClock};
pub use config::{ConfigError, QueueConfig};
pub use fifo::Queue;
pub use item::Identity;
pub use priority::{EntryKey, PriorityEntry};
pub use crate::priority_queue::PriorityQueue;
pub use stats::{QueueStats, EPSILON};
