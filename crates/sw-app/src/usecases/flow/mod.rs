//! Page-sequence navigation engine.

mod context;
mod controller;

pub use context::FinishCallback;
pub use controller::{FlowController, FlowDeps, FlowError, FlowSnapshot};
