pub mod readiness;

pub use readiness::{ReadinessGate, ReadySource, RADIO_READY_TIMEOUT};
