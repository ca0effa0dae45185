use std::sync::Arc;

use sw_core::ports::{hardware::supported_or_absent, HardwareCapabilityPort, HardwareFeature};
use sw_core::settings::keys::KEY_WIFI_CONNECTED;
use sw_core::{
    ActivityOutcome, PageAction, PageBehavior, RequestCode, SettingsAccumulator, SettingsWriter,
};
use tracing::{info, warn};

const CODES: [RequestCode; 2] = [RequestCode::SETUP_WIFI, RequestCode::SETUP_CAPTIVE_PORTAL];

/// Hands off to the platform Wi-Fi picker and waits for its result.
pub struct WifiPage {
    hardware: Arc<dyn HardwareCapabilityPort>,
    connected: bool,
}

impl WifiPage {
    pub fn new(hardware: Arc<dyn HardwareCapabilityPort>) -> Self {
        Self {
            hardware,
            connected: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl PageBehavior for WifiPage {
    fn on_load(&mut self, settings: &SettingsAccumulator) {
        self.connected = settings.get_bool(KEY_WIFI_CONNECTED).unwrap_or(false);
    }

    fn on_leave(&mut self, _forward: bool, _settings: &mut SettingsWriter<'_>) {}

    fn should_skip(&self) -> bool {
        !supported_or_absent(self.hardware.as_ref(), HardwareFeature::Wifi)
    }

    fn request_codes(&self) -> &[RequestCode] {
        &CODES
    }

    fn on_activity_result(
        &mut self,
        code: RequestCode,
        outcome: ActivityOutcome,
        settings: &mut SettingsWriter<'_>,
    ) -> PageAction {
        match outcome {
            ActivityOutcome::Ok => {
                if code == RequestCode::SETUP_WIFI {
                    self.connected = true;
                    settings.put_bool(KEY_WIFI_CONNECTED, true);
                }
                info!(%code, "wifi setup returned ok");
                PageAction::Advance
            }
            ActivityOutcome::Canceled => PageAction::Stay,
            ActivityOutcome::Failed => {
                warn!(%code, "wifi setup activity failed, staying on page");
                PageAction::Stay
            }
        }
    }
}
