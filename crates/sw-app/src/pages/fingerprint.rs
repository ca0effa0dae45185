use std::sync::Arc;

use sw_core::ports::{hardware::supported_or_absent, HardwareCapabilityPort, HardwareFeature};
use sw_core::settings::keys::{KEY_FINGERPRINT_ENROLLED, KEY_LOCKSCREEN_SET};
use sw_core::{
    ActivityOutcome, PageAction, PageBehavior, RequestCode, SettingsAccumulator, SettingsWriter,
};
use tracing::warn;

const CODES: [RequestCode; 1] = [RequestCode::SETUP_FINGERPRINT];

/// Fingerprint enrollment. Skipped on devices without a sensor.
pub struct FingerprintPage {
    hardware: Arc<dyn HardwareCapabilityPort>,
    enrolled: bool,
}

impl FingerprintPage {
    pub fn new(hardware: Arc<dyn HardwareCapabilityPort>) -> Self {
        Self {
            hardware,
            enrolled: false,
        }
    }

    pub fn is_enrolled(&self) -> bool {
        self.enrolled
    }
}

impl PageBehavior for FingerprintPage {
    fn on_load(&mut self, settings: &SettingsAccumulator) {
        self.enrolled = settings
            .get_bool(KEY_FINGERPRINT_ENROLLED)
            .unwrap_or(false);
    }

    fn on_leave(&mut self, _forward: bool, settings: &mut SettingsWriter<'_>) {
        if self.enrolled {
            settings.put_bool(KEY_FINGERPRINT_ENROLLED, true);
        }
    }

    fn should_skip(&self) -> bool {
        !supported_or_absent(self.hardware.as_ref(), HardwareFeature::Fingerprint)
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
                self.enrolled = true;
                settings.put_bool(KEY_FINGERPRINT_ENROLLED, true);
                // Enrollment always sets up a backup screen lock.
                settings.put_bool(KEY_LOCKSCREEN_SET, true);
                PageAction::Advance
            }
            ActivityOutcome::Canceled => PageAction::Stay,
            ActivityOutcome::Failed => {
                warn!("fingerprint enrollment failed, continuing without fingerprint");
                PageAction::Stay
            }
        }
    }
}
