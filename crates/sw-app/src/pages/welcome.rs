use sw_core::{PageBehavior, SettingsAccumulator, SettingsWriter};

/// Greeting page. Always shown.
#[derive(Debug, Default)]
pub struct WelcomePage;

impl PageBehavior for WelcomePage {
    fn on_load(&mut self, _settings: &SettingsAccumulator) {}

    fn on_leave(&mut self, _forward: bool, _settings: &mut SettingsWriter<'_>) {}
}
