mod bank;
mod events;

use std::io::Write;

use clap::Parser;
use env_logger::Builder;

use simcraft_queues::{QueueConfig, SimulationClock};

use crate::bank::{Bank, BankConfig};
use crate::events::EventQueue;

/// Bank with tellers, a bounded lobby queue and a deadline-ordered VIP line
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of arriving customers
    #[clap(long, default_value_t = 1000)]
    customers: u64,

    /// Number of tellers (>= 1)
    #[clap(long, default_value_t = 3)]
    tellers: usize,

    /// Lobby capacity (0 = unlimited)
    #[clap(long, default_value_t = 20)]
    capacity: usize,

    /// Lobby config in YAML, overrides --capacity
    #[clap(long)]
    lobby_config: Option<String>,

    /// Share of VIP customers
    #[clap(long, default_value_t = 0.2)]
    vip_share: f64,

    /// Random seed
    #[clap(long, default_value_t = 123)]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let lobby = match &args.lobby_config {
        Some(path) => QueueConfig::from_file(path).unwrap_or_else(|e| panic!("{}", e)),
        None => {
            let mut config = QueueConfig::new(args.capacity);
            config.set_name("lobby");
            config
        }
    };
    let config = BankConfig {
        customer_count: args.customers,
        teller_count: args.tellers.max(1),
        lobby,
        vip_share: args.vip_share.clamp(0., 1.),
        arrival_rate: 1.,
        service_rate: 0.4,
        patience: 15.,
    };

    let clock = SimulationClock::new();
    let mut events = EventQueue::new(clock.clone());
    let mut bank = Bank::new(config, clock, args.seed);
    bank.start(&mut events);
    while let Some(event) = events.next_event() {
        bank.on_event(event.kind, &mut events);
    }

    println!("Processed {} events", events.event_count());
    println!("{}", serde_json::to_string_pretty(&bank.report()).unwrap());
}
