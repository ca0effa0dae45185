use sw_core::{PageBehavior, SettingsAccumulator, SettingsWriter};
use tracing::debug;

/// Closing page. Leaving it forward ends the flow.
#[derive(Debug, Default)]
pub struct FinishPage {
    pending_settings: usize,
}

impl FinishPage {
    /// Number of settings that will be applied, as seen on the last load.
    pub fn pending_settings(&self) -> usize {
        self.pending_settings
    }
}

impl PageBehavior for FinishPage {
    fn on_load(&mut self, settings: &SettingsAccumulator) {
        self.pending_settings = settings.len();
        debug!(pending = self.pending_settings, "finish page loaded");
    }

    fn on_leave(&mut self, _forward: bool, _settings: &mut SettingsWriter<'_>) {}
}
