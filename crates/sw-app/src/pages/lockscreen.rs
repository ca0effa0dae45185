use sw_core::settings::keys::KEY_LOCKSCREEN_SET;
use sw_core::{
    ActivityOutcome, PageAction, PageBehavior, RequestCode, SettingsAccumulator, SettingsWriter,
};
use tracing::warn;

const CODES: [RequestCode; 1] = [RequestCode::SETUP_LOCKSCREEN];

/// Offers to set a screen lock through the platform lock-screen settings.
#[derive(Debug, Default)]
pub struct LockscreenPage {
    configured: bool,
}

impl LockscreenPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }
}

impl PageBehavior for LockscreenPage {
    fn on_load(&mut self, settings: &SettingsAccumulator) {
        self.configured = settings.get_bool(KEY_LOCKSCREEN_SET).unwrap_or(false);
    }

    fn on_leave(&mut self, _forward: bool, settings: &mut SettingsWriter<'_>) {
        if self.configured {
            settings.put_bool(KEY_LOCKSCREEN_SET, true);
        }
    }

    fn request_codes(&self) -> &[RequestCode] {
        &CODES
    }

    fn on_activity_result(
        &mut self,
        _code: RequestCode,
        outcome: ActivityOutcome,
        settings: &mut SettingsWriter<'_>,
    ) -> PageAction {
        match outcome {
            ActivityOutcome::Ok => {
                self.configured = true;
                settings.put_bool(KEY_LOCKSCREEN_SET, true);
                PageAction::Advance
            }
            ActivityOutcome::Canceled => PageAction::Stay,
            ActivityOutcome::Failed => {
                warn!("lock screen setup failed, lock screen left unset");
                PageAction::Stay
            }
        }
    }
}
