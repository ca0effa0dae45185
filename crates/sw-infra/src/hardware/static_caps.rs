//! Hardware capability table loaded from configuration.
//!
//! Stands in for the device's hardware service on builds without one.
//! Unknown feature names are logged and ignored.

use std::collections::HashSet;

use sw_core::ports::{HardwareCapabilityPort, HardwareError, HardwareFeature};
use tracing::warn;

#[derive(Debug, Default, Clone)]
pub struct StaticHardwareCapabilities {
    supported: HashSet<HardwareFeature>,
    enabled: HashSet<HardwareFeature>,
}

impl StaticHardwareCapabilities {
    pub fn new(
        supported: impl IntoIterator<Item = HardwareFeature>,
        enabled: impl IntoIterator<Item = HardwareFeature>,
    ) -> Self {
        Self {
            supported: supported.into_iter().collect(),
            enabled: enabled.into_iter().collect(),
        }
    }

    /// Builds the table from feature names such as `"wifi"` or `"key_disable"`.
    pub fn from_names(supported: &[String], enabled: &[String]) -> Self {
        Self::new(parse_features(supported), parse_features(enabled))
    }
}

fn parse_features(names: &[String]) -> Vec<HardwareFeature> {
    names
        .iter()
        .filter_map(|name| parse_feature(name))
        .collect()
}

fn parse_feature(name: &str) -> Option<HardwareFeature> {
    let feature = match name.trim().to_ascii_lowercase().as_str() {
        "wifi" => HardwareFeature::Wifi,
        "telephony" => HardwareFeature::Telephony,
        "fingerprint" => HardwareFeature::Fingerprint,
        "key_disable" => HardwareFeature::KeyDisable,
        "navigation_bar" => HardwareFeature::NavigationBar,
        other => {
            warn!(feature = other, "unknown hardware feature in config, ignoring");
            return None;
        }
    };
    Some(feature)
}

impl HardwareCapabilityPort for StaticHardwareCapabilities {
    fn is_supported(&self, feature: HardwareFeature) -> Result<bool, HardwareError> {
        Ok(self.supported.contains(&feature))
    }

    fn get(&self, feature: HardwareFeature) -> Result<bool, HardwareError> {
        if !self.supported.contains(&feature) {
            return Err(HardwareError::Query(format!("{feature:?} not supported")));
        }
        Ok(self.enabled.contains(&feature))
    }
}
