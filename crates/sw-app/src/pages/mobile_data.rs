use std::sync::Arc;

use sw_core::ports::hardware::{enabled_or_off, supported_or_absent};
use sw_core::ports::{HardwareCapabilityPort, HardwareFeature, ReadinessPort};
use sw_core::settings::keys::KEY_MOBILE_DATA_ENABLED;
use sw_core::{PageBehavior, PageInput, SettingsAccumulator, SettingsWriter};
use tracing::debug;

/// Mobile data opt-in. The toggle is only live once the radio is ready.
pub struct MobileDataPage {
    hardware: Arc<dyn HardwareCapabilityPort>,
    radio: Arc<dyn ReadinessPort>,
    waiting_for_radio: bool,
    enabled: bool,
    touched: bool,
}

impl MobileDataPage {
    pub fn new(hardware: Arc<dyn HardwareCapabilityPort>, radio: Arc<dyn ReadinessPort>) -> Self {
        Self {
            hardware,
            radio,
            waiting_for_radio: true,
            enabled: false,
            touched: false,
        }
    }

    pub fn is_waiting_for_radio(&self) -> bool {
        self.waiting_for_radio
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns false while the radio is not ready yet.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.refresh_radio();
        if self.waiting_for_radio {
            debug!("mobile data toggle ignored, radio not ready");
            return false;
        }
        self.enabled = enabled;
        self.touched = true;
        true
    }

    fn refresh_radio(&mut self) {
        self.waiting_for_radio = !self.radio.is_ready();
    }
}

impl PageBehavior for MobileDataPage {
    fn on_load(&mut self, settings: &SettingsAccumulator) {
        self.refresh_radio();
        match settings.get_bool(KEY_MOBILE_DATA_ENABLED) {
            Some(enabled) => {
                self.enabled = enabled;
                self.touched = true;
            }
            None => {
                self.enabled = enabled_or_off(self.hardware.as_ref(), HardwareFeature::Telephony);
                self.touched = false;
            }
        }
    }

    fn on_leave(&mut self, _forward: bool, settings: &mut SettingsWriter<'_>) {
        if self.touched {
            settings.put_bool(KEY_MOBILE_DATA_ENABLED, self.enabled);
        }
    }

    fn should_skip(&self) -> bool {
        !supported_or_absent(self.hardware.as_ref(), HardwareFeature::Telephony)
    }

    fn on_input(&mut self, input: &PageInput) -> bool {
        match input {
            PageInput::SetToggle { key, checked } if key == KEY_MOBILE_DATA_ENABLED => {
                self.set_enabled(*checked)
            }
            PageInput::Refresh => {
                self.refresh_radio();
                true
            }
            PageInput::SetToggle { .. } => false,
        }
    }
}
