pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config};
pub use run::run_setup;
pub use wiring::{wire_ports, WiredPorts};
