use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Hardware features the setup pages ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareFeature {
    Wifi,
    Telephony,
    Fingerprint,
    KeyDisable,
    NavigationBar,
}

#[derive(Debug, Error)]
pub enum HardwareError {
    #[error("hardware service unavailable: {0}")]
    Unavailable(String),

    #[error("feature query failed: {0}")]
    Query(String),
}

/// Hardware capability service.
///
/// Calls are synchronous and cheap; callers treat any error as the feature
/// being unsupported.
pub trait HardwareCapabilityPort: Send + Sync {
    fn is_supported(&self, feature: HardwareFeature) -> Result<bool, HardwareError>;
    fn get(&self, feature: HardwareFeature) -> Result<bool, HardwareError>;
}

/// `is_supported` with errors folded into `false`.
pub fn supported_or_absent(port: &dyn HardwareCapabilityPort, feature: HardwareFeature) -> bool {
    match port.is_supported(feature) {
        Ok(supported) => supported,
        Err(err) => {
            warn!(?feature, error = %err, "hardware query failed, treating feature as unsupported");
            false
        }
    }
}

/// `get` with errors folded into `false`.
pub fn enabled_or_off(port: &dyn HardwareCapabilityPort, feature: HardwareFeature) -> bool {
    match port.get(feature) {
        Ok(enabled) => enabled,
        Err(err) => {
            warn!(?feature, error = %err, "hardware state query failed, treating feature as off");
            false
        }
    }
}

#[cfg(test)]
mockall::mock! {
    pub Hardware {}

    impl HardwareCapabilityPort for Hardware {
        fn is_supported(&self, feature: HardwareFeature) -> Result<bool, HardwareError>;
        fn get(&self, feature: HardwareFeature) -> Result<bool, HardwareError>;
    }
}
