use tokio::sync::{Mutex, MutexGuard, TryLockError};

use sw_core::{
    FlowId, FlowPhase, PageKey, PageList, PageSnapshot, Position, SettingsAccumulator,
};

/// Callback run once when the flow enters its finishing phase.
pub type FinishCallback = Box<dyn FnOnce() + Send>;

/// Mutable flow state guarded by [`FlowContext::state`].
pub(super) struct FlowInner {
    pub phase: FlowPhase,
    pub pages: PageList,
    /// Taken for the flush; `None` afterwards.
    pub settings: Option<SettingsAccumulator>,
    pub current: Option<PageKey>,
    pub history: Vec<PageKey>,
    pub finish_callbacks: Vec<FinishCallback>,
}

impl FlowInner {
    pub fn current_position(&self) -> Option<Position> {
        self.current
            .as_ref()
            .and_then(|key| self.pages.get(key))
            .map(|page| page.position())
    }

    pub fn current_snapshot(&self) -> Option<PageSnapshot> {
        self.current
            .as_ref()
            .and_then(|key| self.pages.get(key))
            .map(|page| page.snapshot())
    }
}

/// Shared flow context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: held for a whole transition, including event emission
///   and the finishing flush. Never waited on; a busy lock rejects the call.
/// - `state`: short critical sections only, never held across an await on a
///   port.
pub(super) struct FlowContext {
    flow_id: FlowId,
    state: Mutex<FlowInner>,
    dispatch_lock: Mutex<()>,
}

impl FlowContext {
    pub fn new(pages: PageList, settings: SettingsAccumulator) -> Self {
        Self {
            flow_id: FlowId::new(),
            state: Mutex::new(FlowInner {
                phase: FlowPhase::Idle,
                pages,
                settings: Some(settings),
                current: None,
                history: Vec::new(),
                finish_callbacks: Vec::new(),
            }),
            dispatch_lock: Mutex::new(()),
        }
    }

    pub fn flow_id(&self) -> &FlowId {
        &self.flow_id
    }

    pub async fn state(&self) -> MutexGuard<'_, FlowInner> {
        self.state.lock().await
    }

    /// Claims the dispatch lock without waiting.
    pub fn try_dispatch(&self) -> Result<MutexGuard<'_, ()>, TryLockError> {
        self.dispatch_lock.try_lock()
    }
}
