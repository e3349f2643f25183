use std::rc::Rc;

use rand::prelude::*;
use rand_distr::Exp;
use rand_pcg::Pcg64;

use simcraft_queues::{log_debug, log_info, PriorityQueue, Queue, QueueConfig, SimulationClock};

use crate::events::{EventKind, EventQueue};

#[derive(Debug, PartialEq)]
pub struct Customer {
    pub id: u64,
    pub vip: bool,
    pub deadline: f64,
}

pub struct BankConfig {
    pub customer_count: u64,
    pub teller_count: usize,
    pub lobby: QueueConfig,
    pub vip_share: f64,
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub patience: f64,
}

pub struct Bank {
    config: BankConfig,
    lobby: Queue<Rc<Customer>>,
    vip_line: PriorityQueue<Rc<Customer>>,
    busy_tellers: Vec<bool>,
    arrivals: u64,
    served: u64,
    balked: u64,
    abandoned: u64,
    interarrival: Exp<f64>,
    service: Exp<f64>,
    rand: Pcg64,
}

impl Bank {
    pub fn new(config: BankConfig, clock: SimulationClock, seed: u64) -> Self {
        let lobby = Queue::from_config(clock.clone(), &config.lobby);
        // customers with the earliest deadline are served first
        let vip_line = PriorityQueue::new(clock, 0)
            .with_name("vip-line")
            .with_priority_fn(|customer: &Rc<Customer>| customer.deadline);
        Self {
            lobby,
            vip_line,
            busy_tellers: vec![false; config.teller_count],
            arrivals: 0,
            served: 0,
            balked: 0,
            abandoned: 0,
            interarrival: Exp::new(config.arrival_rate).unwrap(),
            service: Exp::new(config.service_rate).unwrap(),
            rand: Pcg64::seed_from_u64(seed),
            config,
        }
    }

    pub fn start(&mut self, events: &mut EventQueue) {
        log_info!(self.lobby, "bank opens with {} tellers", self.busy_tellers.len());
        events.schedule(EventKind::Arrival, self.interarrival.sample(&mut self.rand));
    }

    pub fn on_event(&mut self, kind: EventKind, events: &mut EventQueue) {
        match kind {
            EventKind::Arrival => self.on_arrival(events),
            EventKind::Escalation(customer) => {
                if self.vip_line.update_priority(&customer, f64::NEG_INFINITY) {
                    log_debug!(self.vip_line, "customer {} escalated to the manager", customer.id);
                }
            }
            EventKind::Abandon(customer) => {
                if self.vip_line.remove(&customer) {
                    self.abandoned += 1;
                    log_debug!(self.vip_line, "customer {} left without service", customer.id);
                }
            }
            EventKind::ServiceCompleted { teller } => {
                self.busy_tellers[teller] = false;
                self.served += 1;
                let next = self.vip_line.dequeue().or_else(|| self.lobby.dequeue());
                if let Some(customer) = next {
                    self.start_service(teller, customer, events);
                }
            }
        }
    }

    fn on_arrival(&mut self, events: &mut EventQueue) {
        self.arrivals += 1;
        let now = self.lobby.time();
        let customer = Rc::new(Customer {
            id: self.arrivals,
            vip: self.rand.gen_bool(self.config.vip_share),
            deadline: now + self.config.patience,
        });
        if self.arrivals < self.config.customer_count {
            events.schedule(EventKind::Arrival, self.interarrival.sample(&mut self.rand));
        }

        if let Some(teller) = self.busy_tellers.iter().position(|busy| !busy) {
            self.start_service(teller, customer, events);
        } else if customer.vip {
            self.vip_line.enqueue(customer.clone());
            events.schedule(EventKind::Escalation(customer.clone()), self.config.patience / 2.);
            events.schedule(EventKind::Abandon(customer), self.config.patience);
        } else if !self.lobby.enqueue(customer.clone()) {
            self.balked += 1;
            log_debug!(self.lobby, "customer {} balked", customer.id);
        }
    }

    fn start_service(&mut self, teller: usize, customer: Rc<Customer>, events: &mut EventQueue) {
        self.busy_tellers[teller] = true;
        log_debug!(self.lobby, "teller {} serves customer {} (vip: {})", teller, customer.id, customer.vip);
        events.schedule(
            EventKind::ServiceCompleted { teller },
            self.service.sample(&mut self.rand),
        );
    }

    pub fn report(&self) -> serde_json::Value {
        serde_json::json!({
            "arrivals": self.arrivals,
            "served": self.served,
            "balked": self.balked,
            "abandoned": self.abandoned,
            "lobby": {
                "queue": self.lobby.to_string(),
                "stats": self.lobby.stats(),
            },
            "vip_line": {
                "queue": self.vip_line.to_string(),
                "stats": self.vip_line.stats(),
            },
        })
    }
}
