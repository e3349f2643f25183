use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use simcraft_queues::{Clock, SimulationClock};

use crate::bank::Customer;

pub enum EventKind {
    Arrival,
    Escalation(Rc<Customer>),
    Abandon(Rc<Customer>),
    ServiceCompleted { teller: usize },
}

pub struct Event {
    pub id: u64,
    pub time: f64,
    pub kind: EventKind,
}

impl Eq for Event {}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        other.time.total_cmp(&self.time).then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Minimal event loop driving the shared clock.
pub struct EventQueue {
    clock: SimulationClock,
    events: BinaryHeap<Event>,
    event_count: u64,
}

impl EventQueue {
    pub fn new(clock: SimulationClock) -> Self {
        Self {
            clock,
            events: BinaryHeap::new(),
            event_count: 0,
        }
    }

    pub fn schedule(&mut self, kind: EventKind, delay: f64) {
        let event = Event {
            id: self.event_count,
            time: self.clock.time() + delay.max(0.),
            kind,
        };
        self.events.push(event);
        self.event_count += 1;
    }

    /// Pops the next event and moves the clock to its time.
    pub fn next_event(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.clock.set_time(event.time);
        Some(event)
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }
}
