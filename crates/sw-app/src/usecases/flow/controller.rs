//! Flow controller.
//!
//! Walks the page list forward and backward, dispatches page lifecycle hooks
//! and finalizes the flow. Every transition runs under the dispatch lock;
//! page hooks run with the state lock held, port calls never do.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, info_span, warn, Instrument};

use sw_core::ports::{FlowEventPort, SettingsStorePort};
use sw_core::{
    ActivityOutcome, FlowPhase, Page, PageAction, PageInput, PageKey, PageList, PageListError,
    PageSnapshot, Position, RequestCode, SettingsAccumulator, BEFORE_FIRST,
};

use super::context::{FinishCallback, FlowContext, FlowInner};
use crate::usecases::MarkSetupComplete;

/// Errors produced by the flow controller.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("setup flow already finished")]
    AlreadyFinished,
    #[error("another transition is in progress")]
    TransitionInProgress,
    #[error("operation requires phase {expected:?}, flow is {actual:?}")]
    InvalidPhase {
        expected: FlowPhase,
        actual: FlowPhase,
    },
    #[error("page not found: {0}")]
    PageNotFound(PageKey),
    #[error("page list rejected change: {0}")]
    PageList(#[from] PageListError),
}

/// Observable result of a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowSnapshot {
    pub phase: FlowPhase,
    pub current: Option<PageSnapshot>,
}

/// Ports the controller talks through.
#[derive(Clone)]
pub struct FlowDeps {
    pub settings_store: Arc<dyn SettingsStorePort>,
    pub events: Arc<dyn FlowEventPort>,
    pub mark_setup_complete: Arc<MarkSetupComplete>,
}

/// Rendering notifications collected under the state lock and emitted after
/// it is released.
enum Notice {
    PageLoaded(PageSnapshot),
    TreeChanged,
}

/// Work left for the finishing phase, taken out of the state.
struct FinishWork {
    settings: Option<SettingsAccumulator>,
    callbacks: Vec<FinishCallback>,
}

#[derive(Default)]
struct Step {
    notices: Vec<Notice>,
    finishing: Option<FinishWork>,
    handled: bool,
}

impl Step {
    fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }
}

pub struct FlowController {
    context: Arc<FlowContext>,
    deps: FlowDeps,
}

impl FlowController {
    pub fn new(pages: PageList, deps: FlowDeps) -> Self {
        Self::with_initial_settings(pages, SettingsAccumulator::new(), deps)
    }

    /// Creates a controller whose accumulator starts with `settings`.
    pub fn with_initial_settings(
        pages: PageList,
        settings: SettingsAccumulator,
        deps: FlowDeps,
    ) -> Self {
        Self {
            context: Arc::new(FlowContext::new(pages, settings)),
            deps,
        }
    }

    pub async fn start(&self) -> Result<FlowSnapshot, FlowError> {
        self.dispatch("start", |inner| {
            match inner.phase {
                FlowPhase::Idle => {}
                FlowPhase::Finished => return Err(FlowError::AlreadyFinished),
                actual => {
                    return Err(FlowError::InvalidPhase {
                        expected: FlowPhase::Idle,
                        actual,
                    })
                }
            }
            inner.phase = FlowPhase::Running;
            info!(pages = inner.pages.len(), "setup flow started");

            let mut step = Step::handled();
            inner.advance_from(BEFORE_FIRST, &mut step);
            Ok(step)
        })
        .await
    }

    pub async fn next_page(&self) -> Result<FlowSnapshot, FlowError> {
        self.dispatch("next_page", |inner| {
            inner.ensure_running()?;
            let mut step = Step::handled();
            inner.go_forward(&mut step);
            Ok(step)
        })
        .await
    }

    /// Returns to the page visited before the current one. A no-op when
    /// nothing has been visited yet.
    pub async fn previous_page(&self) -> Result<FlowSnapshot, FlowError> {
        self.dispatch("previous_page", |inner| {
            inner.ensure_running()?;
            let mut step = Step::handled();

            while let Some(target) = inner.history.pop() {
                if !inner.pages.contains(&target) {
                    continue;
                }
                inner.leave_current(false);
                inner.load(&target, &mut step);
                break;
            }
            Ok(step)
        })
        .await
    }

    pub async fn set_current_page(
        &self,
        key: impl Into<PageKey>,
    ) -> Result<FlowSnapshot, FlowError> {
        let key = key.into();
        self.dispatch("set_current_page", move |inner| {
            inner.ensure_running()?;
            let target_position = inner
                .pages
                .get(&key)
                .map(Page::position)
                .ok_or_else(|| FlowError::PageNotFound(key.clone()))?;

            let mut step = Step::handled();
            if inner.current.as_ref() == Some(&key) {
                return Ok(step);
            }

            let forward = inner
                .current_position()
                .map_or(true, |position| target_position > position);
            inner.leave_current(forward);

            if forward {
                if let Some(previous) = inner.current.take() {
                    inner.history.push(previous);
                }
            } else {
                let pages = &inner.pages;
                inner.history.retain(|visited| {
                    pages
                        .get(visited)
                        .is_some_and(|page| page.position() < target_position)
                });
            }

            inner.load(&key, &mut step);
            Ok(step)
        })
        .await
    }

    /// Ends the flow from `Running` or resumes an interrupted `Finishing`.
    pub async fn finish_setup(&self) -> Result<FlowSnapshot, FlowError> {
        self.dispatch("finish_setup", |inner| {
            let mut step = Step::handled();
            match inner.phase {
                FlowPhase::Running => {
                    inner.leave_current(true);
                    step.finishing = Some(inner.enter_finishing());
                }
                FlowPhase::Finishing => {
                    step.finishing = Some(inner.take_finish_work());
                }
                FlowPhase::Finished => return Err(FlowError::AlreadyFinished),
                FlowPhase::Idle => {
                    return Err(FlowError::InvalidPhase {
                        expected: FlowPhase::Running,
                        actual: FlowPhase::Idle,
                    })
                }
            }
            Ok(step)
        })
        .await
    }

    /// Registers `callback` to run when the flow finishes.
    pub async fn add_finish_runnable(
        &self,
        callback: impl FnOnce() + Send + 'static,
    ) -> Result<(), FlowError> {
        let mut inner = self.context.state().await;
        if inner.phase.is_finished() {
            return Err(FlowError::AlreadyFinished);
        }
        inner.finish_callbacks.push(Box::new(callback));
        Ok(())
    }

    /// Inserts a page while the flow runs. Its position decides where it
    /// lands in the traversal order.
    pub async fn add_page(&self, page: Page) -> Result<FlowSnapshot, FlowError> {
        self.dispatch("add_page", move |inner| {
            if inner.phase.is_finished() {
                return Err(FlowError::AlreadyFinished);
            }
            inner.pages.append(page)?;
            let mut step = Step::handled();
            step.notices.push(Notice::TreeChanged);
            Ok(step)
        })
        .await
    }

    /// Removes a page. Unknown keys are ignored.
    ///
    /// Removing the current page drops it without `on_leave` and moves on to
    /// the next eligible page after its position, or finishes the flow.
    pub async fn remove_page(&self, key: impl Into<PageKey>) -> Result<FlowSnapshot, FlowError> {
        let key = key.into();
        self.dispatch("remove_page", move |inner| {
            if inner.phase.is_finished() {
                return Err(FlowError::AlreadyFinished);
            }
            let mut step = Step::handled();
            let Some(removed) = inner.pages.remove_by_key(&key) else {
                debug!(key = %key, "remove_page ignored, page not in list");
                return Ok(step);
            };
            inner.history.retain(|visited| visited != &key);
            step.notices.push(Notice::TreeChanged);

            if inner.current.as_ref() == Some(&key) {
                inner.current = None;
                if inner.phase == FlowPhase::Running {
                    info!(key = %key, "current page removed, advancing");
                    inner.advance_from(Some(removed.position()), &mut step);
                }
            }
            Ok(step)
        })
        .await
    }

    /// Routes an external activity result to the page that claimed `code`.
    ///
    /// Returns `Ok(None)` when no page owns the code.
    pub async fn deliver_activity_result(
        &self,
        code: RequestCode,
        outcome: ActivityOutcome,
    ) -> Result<Option<FlowSnapshot>, FlowError> {
        let (handled, snapshot) = self
            .dispatch_step("deliver_activity_result", move |inner| {
                if inner.phase.is_finished() {
                    return Err(FlowError::AlreadyFinished);
                }
                let Some(owner) = inner.pages.owner_of(code).cloned() else {
                    warn!(%code, ?outcome, "activity result for unknown request code");
                    return Ok(Step::default());
                };

                let action = {
                    let FlowInner {
                        pages, settings, ..
                    } = &mut *inner;
                    let settings = settings.get_or_insert_with(SettingsAccumulator::new);
                    match pages.get_mut(&owner) {
                        Some(page) => page.deliver_result(code, outcome, settings),
                        None => PageAction::Stay,
                    }
                };
                debug!(%code, ?outcome, owner = %owner, ?action, "activity result delivered");

                let mut step = Step::handled();
                let is_current = inner.current.as_ref() == Some(&owner);
                if action == PageAction::Advance && is_current && inner.phase == FlowPhase::Running
                {
                    inner.go_forward(&mut step);
                }
                Ok(step)
            })
            .await?;
        Ok(handled.then_some(snapshot))
    }

    /// Forwards discrete user input to the current page.
    ///
    /// Returns whether the page handled it; input for a page that is not
    /// current is ignored.
    pub async fn page_input(
        &self,
        key: impl Into<PageKey>,
        input: PageInput,
    ) -> Result<bool, FlowError> {
        let key = key.into();
        let mut inner = self.context.state().await;
        inner.ensure_running()?;
        if !inner.pages.contains(&key) {
            return Err(FlowError::PageNotFound(key));
        }
        if inner.current.as_ref() != Some(&key) {
            debug!(key = %key, "input for page that is not current, ignoring");
            return Ok(false);
        }
        let handled = inner
            .pages
            .get_mut(&key)
            .is_some_and(|page| page.input(&input));
        Ok(handled)
    }

    pub async fn get_page(&self, key: &PageKey) -> Option<PageSnapshot> {
        let inner = self.context.state().await;
        inner.pages.get(key).map(Page::snapshot)
    }

    pub async fn get_page_at(&self, position: Position) -> Option<PageSnapshot> {
        let inner = self.context.state().await;
        inner.pages.get_by_position(position).map(Page::snapshot)
    }

    pub async fn current_page(&self) -> Option<PageSnapshot> {
        self.context.state().await.current_snapshot()
    }

    pub async fn is_current_page(&self, key: &PageKey) -> bool {
        self.context.state().await.current.as_ref() == Some(key)
    }

    pub async fn phase(&self) -> FlowPhase {
        self.context.state().await.phase
    }

    /// Keys of the pages a back press would return to, oldest first.
    pub async fn history(&self) -> Vec<PageKey> {
        self.context.state().await.history.clone()
    }

    /// Copy of the settings collected so far; `None` once flushed.
    pub async fn pending_settings(&self) -> Option<SettingsAccumulator> {
        self.context.state().await.settings.clone()
    }

    pub async fn snapshot(&self) -> FlowSnapshot {
        let inner = self.context.state().await;
        FlowSnapshot {
            phase: inner.phase,
            current: inner.current_snapshot(),
        }
    }

    async fn dispatch<F>(&self, op: &'static str, transition: F) -> Result<FlowSnapshot, FlowError>
    where
        F: FnOnce(&mut FlowInner) -> Result<Step, FlowError> + Send,
    {
        let (_, snapshot) = self.dispatch_step(op, transition).await?;
        Ok(snapshot)
    }

    /// Runs `transition` under the dispatch lock and reports whether it
    /// handled the request along with the resulting snapshot.
    async fn dispatch_step<F>(
        &self,
        op: &'static str,
        transition: F,
    ) -> Result<(bool, FlowSnapshot), FlowError>
    where
        F: FnOnce(&mut FlowInner) -> Result<Step, FlowError> + Send,
    {
        let _dispatch_guard = self.context.try_dispatch().map_err(|_| {
            debug!(op, "transition rejected, another one is in progress");
            FlowError::TransitionInProgress
        })?;

        let span = info_span!(
            "usecase.flow.dispatch",
            flow_id = %self.context.flow_id(),
            op
        );
        async {
            let step = {
                let mut inner = self.context.state().await;
                let from = inner.phase;
                let step = transition(&mut *inner)?;
                if from != inner.phase {
                    info!(from = ?from, to = ?inner.phase, "setup flow phase transition");
                }
                step
            };

            for notice in step.notices {
                match notice {
                    Notice::PageLoaded(page) => self.deps.events.on_page_loaded(page).await,
                    Notice::TreeChanged => self.deps.events.on_page_tree_changed().await,
                }
            }
            if let Some(work) = step.finishing {
                self.finalize(work).await;
            }

            Ok((step.handled, self.snapshot().await))
        }
        .instrument(span)
        .await
    }

    async fn finalize(&self, work: FinishWork) {
        if let Some(settings) = work.settings {
            self.flush(settings).await;
        }

        if let Err(err) = self.deps.mark_setup_complete.execute().await {
            error!(error = %err, "failed to mark setup complete");
        }

        for callback in work.callbacks {
            callback();
        }

        self.deps.events.on_finish().await;

        // Callbacks registered while finishing still run exactly once.
        let late_callbacks = {
            let mut inner = self.context.state().await;
            inner.phase = FlowPhase::Finished;
            inner.current = None;
            std::mem::take(&mut inner.finish_callbacks)
        };
        for callback in late_callbacks {
            callback();
        }
        info!("setup flow finished");
    }

    async fn flush(&self, settings: SettingsAccumulator) {
        let mut applied = 0usize;
        let mut failed = 0usize;
        for (key, value) in settings.into_entries() {
            match self.deps.settings_store.put(&key, &value).await {
                Ok(()) => {
                    debug!(key = %key, value = %value, "setting applied");
                    applied += 1;
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "failed to apply setting, skipping");
                    failed += 1;
                }
            }
        }
        info!(applied, failed, "pending settings flushed");
    }
}

impl FlowInner {
    fn ensure_running(&self) -> Result<(), FlowError> {
        match self.phase {
            FlowPhase::Running => Ok(()),
            FlowPhase::Finished => Err(FlowError::AlreadyFinished),
            actual => Err(FlowError::InvalidPhase {
                expected: FlowPhase::Running,
                actual,
            }),
        }
    }

    fn go_forward(&mut self, step: &mut Step) {
        let from = self.current_position();
        self.leave_current(true);
        if let Some(previous) = self.current.take() {
            self.history.push(previous);
        }
        self.advance_from(from, step);
    }

    /// Loads the first eligible page after `from`, or starts finishing.
    fn advance_from(&mut self, from: Option<Position>, step: &mut Step) {
        let next = self
            .pages
            .next_eligible(from)
            .map(|page| (page.key().clone(), page.position()));

        match next {
            Some((key, position)) => {
                self.pages.mark_skipped_between(from, Some(position));
                self.load(&key, step);
            }
            None => {
                self.pages.mark_skipped_between(from, None);
                step.finishing = Some(self.enter_finishing());
            }
        }
    }

    fn leave_current(&mut self, forward: bool) {
        let Some(key) = self.current.clone() else {
            return;
        };
        let FlowInner {
            pages, settings, ..
        } = &mut *self;
        if let Some(page) = pages.get_mut(&key) {
            page.leave(forward, settings.get_or_insert_with(SettingsAccumulator::new));
            debug!(key = %key, forward, "page left");
        }
    }

    fn load(&mut self, key: &PageKey, step: &mut Step) {
        let FlowInner {
            pages, settings, ..
        } = &mut *self;
        let Some(page) = pages.get_mut(key) else {
            return;
        };
        page.load(settings.get_or_insert_with(SettingsAccumulator::new));
        debug!(key = %key, position = page.position(), "page loaded");
        step.notices.push(Notice::PageLoaded(page.snapshot()));
        self.current = Some(key.clone());
    }

    fn enter_finishing(&mut self) -> FinishWork {
        self.phase = FlowPhase::Finishing;
        self.take_finish_work()
    }

    fn take_finish_work(&mut self) -> FinishWork {
        FinishWork {
            settings: self.settings.take(),
            callbacks: std::mem::take(&mut self.finish_callbacks),
        }
    }
}
