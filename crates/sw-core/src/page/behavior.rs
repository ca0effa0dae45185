use crate::flow::{ActivityOutcome, RequestCode};
use crate::settings::{SettingsAccumulator, SettingsWriter};

/// What a page asks the engine to do after handling an external result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Stay,
    /// Move forward as if the user pressed next. Only honoured while the
    /// page is current.
    Advance,
}

/// Discrete user input addressed to the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageInput {
    /// A checkbox-style option identified by the setting it controls.
    SetToggle { key: String, checked: bool },
    /// Re-query platform state the page depends on.
    Refresh,
}

/// Capabilities of one wizard step.
///
/// Hooks run on the engine's control path and must not block. A page that
/// needs a slow platform call resolves it ahead of time or reports it later
/// as a discrete event.
pub trait PageBehavior: Send {
    /// Called each time the page becomes current. Transient state must be
    /// rebuilt from `settings` since the page may be loaded many times.
    fn on_load(&mut self, settings: &SettingsAccumulator);

    /// Called when the engine moves away from the page. Commits pending
    /// input; calling it twice in a row must be harmless.
    fn on_leave(&mut self, forward: bool, settings: &mut SettingsWriter<'_>);

    /// Pure predicate, evaluated afresh on every traversal.
    fn should_skip(&self) -> bool {
        false
    }

    /// Activity-result codes this page started and wants delivered.
    fn request_codes(&self) -> &[RequestCode] {
        &[]
    }

    /// Returns whether the page handled `input`.
    fn on_input(&mut self, _input: &PageInput) -> bool {
        false
    }

    fn on_activity_result(
        &mut self,
        _code: RequestCode,
        _outcome: ActivityOutcome,
        _settings: &mut SettingsWriter<'_>,
    ) -> PageAction {
        PageAction::Stay
    }
}
