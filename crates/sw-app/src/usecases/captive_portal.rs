use std::sync::Arc;

use sw_core::ports::SettingsStorePort;
use sw_core::settings::keys::KEY_DETECT_CAPTIVE_PORTAL;
use sw_core::{SettingValue, SettingsAccumulator};
use tracing::{info, warn};

/// Turns captive-portal detection off for the duration of the flow.
///
/// Detection would otherwise hijack the Wi-Fi page with a sign-in screen.
/// The returned seed puts detection back on through the final flush.
pub struct DisableCaptivePortal {
    settings_store: Arc<dyn SettingsStorePort>,
}

impl DisableCaptivePortal {
    pub fn new(settings_store: Arc<dyn SettingsStorePort>) -> Self {
        Self { settings_store }
    }

    /// Only the device owner may change the setting; for other users this
    /// returns an empty seed and touches nothing.
    pub async fn execute(&self, is_owner: bool) -> SettingsAccumulator {
        let mut seed = SettingsAccumulator::new();
        if !is_owner {
            return seed;
        }

        match self
            .settings_store
            .put(KEY_DETECT_CAPTIVE_PORTAL, &SettingValue::Int(0))
            .await
        {
            Ok(()) => {
                info!("captive portal detection disabled for setup");
                seed.put(KEY_DETECT_CAPTIVE_PORTAL, SettingValue::Int(1));
            }
            Err(err) => {
                warn!(error = %err, "failed to disable captive portal detection");
            }
        }
        seed
    }
}
