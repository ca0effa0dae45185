//! Setup flow domain types.
//!
//! These describe the observable state of a flow run and the activity-result
//! channel. The navigation engine itself lives in the application layer.

mod phase;
mod request;

pub use phase::FlowPhase;
pub use request::{ActivityOutcome, RequestCode};
