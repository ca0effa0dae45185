use serde::{Deserialize, Serialize};

/// Lifecycle phase of a setup flow.
///
/// `Idle -> Running -> Finishing -> Finished`. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    /// Created, no page loaded yet.
    Idle,
    /// A page is current and navigation events are accepted.
    Running,
    /// Settings are being flushed and finish callbacks run.
    Finishing,
    /// Terminal.
    Finished,
}

impl FlowPhase {
    pub fn is_finished(self) -> bool {
        matches!(self, FlowPhase::Finished)
    }

    /// Whether a forced finish may be requested in this phase.
    pub fn can_finish(self) -> bool {
        matches!(self, FlowPhase::Running | FlowPhase::Finishing)
    }
}
