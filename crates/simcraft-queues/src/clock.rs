//! Read-only access to the simulation time.

use std::cell::Cell;
use std::rc::Rc;

use log::error;

use crate::stats::EPSILON;

/// A source of the current simulation time.
///
/// Queues only read the time and never change it. The returned value must be non-negative
/// and must not decrease over the lifetime of a queue.
///
/// Any `Fn() -> f64` closure is a clock, which allows to plug queues into an existing simulation:
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use simcraft_queues::Queue;
///
/// let now = Rc::new(Cell::new(0.));
/// let time = now.clone();
/// let mut queue = Queue::new(move || time.get(), 0);
/// queue.enqueue(1);
/// now.set(2.);
/// queue.dequeue();
/// assert_eq!(queue.stats().total_wait_time(), 2.);
/// ```
pub trait Clock {
    /// Returns the current simulation time.
    fn time(&self) -> f64;
}

impl<F> Clock for F
where
    F: Fn() -> f64,
{
    fn time(&self) -> f64 {
        self()
    }
}

/// A manually advanced clock which can be shared between a simulation driver and its queues.
///
/// Clones share the same time value, so the driver keeps one copy and hands clones to the queues.
#[derive(Clone, Default)]
pub struct SimulationClock {
    time: Rc<Cell<f64>>,
}

impl SimulationClock {
    /// Creates a clock starting at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock to the specified time.
    ///
    /// Panics if the time is in the past.
    pub fn set_time(&self, time: f64) {
        let now = self.time.get();
        if time < now - EPSILON {
            error!(
                target: "clock",
                "[{:.3} {} clock] Attempt to move time backwards to {:.3}",
                now,
                crate::log::get_colored("ERROR", colored::Color::Red),
                time
            );
            panic!("Simulation time can not go backwards.");
        }
        self.time.set(time.max(now));
    }

    /// Advances the clock by the specified non-negative delay.
    pub fn advance(&self, delay: f64) {
        self.set_time(self.time.get() + delay);
    }
}

impl Clock for SimulationClock {
    fn time(&self) -> f64 {
        self.time.get()
    }
}
