//! Services and preferences page.
//!
//! Shows up to four toggles. Which ones are visible and where they start is
//! decided from config and from the platform values read before the flow
//! starts; the page itself never touches the store.

use std::sync::Arc;

use sw_core::ports::hardware::supported_or_absent;
use sw_core::ports::{HardwareCapabilityPort, HardwareFeature, SettingsStorePort};
use sw_core::settings::keys::{
    DEV_FORCE_SHOW_NAVBAR, DISABLE_NAV_KEYS, KEY_APPLY_DEFAULT_THEME, KEY_PRIVACY_GUARD,
    KEY_SEND_METRICS,
};
use sw_core::{AppConfig, PageBehavior, PageInput, SettingsAccumulator, SettingsWriter};
use tracing::warn;

/// Theme name meaning "no theme to offer".
const SYSTEM_THEME: &str = "system";

/// Starting values for the services toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicesDefaults {
    pub default_theme: String,
    pub theme_checked_by_default: bool,
    /// Current platform value of the forced on-screen navigation bar.
    pub force_show_navbar: bool,
    /// Current platform value of the privacy guard default.
    pub privacy_guard: bool,
}

impl ServicesDefaults {
    pub fn offers_theme(&self) -> bool {
        !self.default_theme.is_empty() && self.default_theme != SYSTEM_THEME
    }
}

/// Reads the platform side of [`ServicesDefaults`]. Store errors read as off.
pub async fn load_services_defaults(
    store: &dyn SettingsStorePort,
    config: &AppConfig,
) -> ServicesDefaults {
    ServicesDefaults {
        default_theme: config.default_theme.clone(),
        theme_checked_by_default: config.theme_checked_by_default,
        force_show_navbar: read_flag(store, DEV_FORCE_SHOW_NAVBAR).await,
        privacy_guard: read_flag(store, KEY_PRIVACY_GUARD).await,
    }
}

async fn read_flag(store: &dyn SettingsStorePort, key: &str) -> bool {
    match store.get(key).await {
        Ok(value) => value.and_then(|v| v.as_bool()).unwrap_or(false),
        Err(err) => {
            warn!(key, error = %err, "failed to read platform setting, using off");
            false
        }
    }
}

pub struct ServicesPage {
    hardware: Arc<dyn HardwareCapabilityPort>,
    defaults: ServicesDefaults,
    metrics: bool,
    /// `None` when the toggle is hidden.
    theme: Option<bool>,
    nav_keys: Option<bool>,
    privacy_guard: bool,
}

impl ServicesPage {
    pub fn new(hardware: Arc<dyn HardwareCapabilityPort>, defaults: ServicesDefaults) -> Self {
        Self {
            hardware,
            defaults,
            metrics: true,
            theme: None,
            nav_keys: None,
            privacy_guard: false,
        }
    }

    pub fn metrics(&self) -> bool {
        self.metrics
    }

    pub fn theme(&self) -> Option<bool> {
        self.theme
    }

    pub fn nav_keys(&self) -> Option<bool> {
        self.nav_keys
    }

    pub fn privacy_guard(&self) -> bool {
        self.privacy_guard
    }

    pub fn set_metrics(&mut self, checked: bool) {
        self.metrics = checked;
    }

    /// Returns false when the theme toggle is hidden.
    pub fn set_theme(&mut self, checked: bool) -> bool {
        set_visible(&mut self.theme, checked)
    }

    /// Returns false when the nav-keys toggle is hidden.
    pub fn set_nav_keys(&mut self, checked: bool) -> bool {
        set_visible(&mut self.nav_keys, checked)
    }

    pub fn set_privacy_guard(&mut self, checked: bool) {
        self.privacy_guard = checked;
    }

    // Hardware keys can only be swapped for the on-screen bar when they can be
    // turned off and the device does not already have a permanent bar.
    fn offers_nav_keys(&self) -> bool {
        supported_or_absent(self.hardware.as_ref(), HardwareFeature::KeyDisable)
            && !supported_or_absent(self.hardware.as_ref(), HardwareFeature::NavigationBar)
    }
}

fn set_visible(slot: &mut Option<bool>, checked: bool) -> bool {
    match slot {
        Some(value) => {
            *value = checked;
            true
        }
        None => false,
    }
}

impl PageBehavior for ServicesPage {
    fn on_load(&mut self, settings: &SettingsAccumulator) {
        self.metrics = settings.get_bool(KEY_SEND_METRICS).unwrap_or(true);

        self.theme = self.defaults.offers_theme().then(|| {
            settings
                .get_bool(KEY_APPLY_DEFAULT_THEME)
                .unwrap_or(self.defaults.theme_checked_by_default)
        });

        self.nav_keys = self.offers_nav_keys().then(|| {
            settings
                .get_bool(DISABLE_NAV_KEYS)
                .unwrap_or(self.defaults.force_show_navbar)
        });

        self.privacy_guard = settings
            .get_bool(KEY_PRIVACY_GUARD)
            .unwrap_or(self.defaults.privacy_guard);
    }

    fn on_leave(&mut self, _forward: bool, settings: &mut SettingsWriter<'_>) {
        settings.put_bool(KEY_SEND_METRICS, self.metrics);
        if let Some(theme) = self.theme {
            settings.put_bool(KEY_APPLY_DEFAULT_THEME, theme);
        }
        if let Some(nav_keys) = self.nav_keys {
            settings.put_bool(DISABLE_NAV_KEYS, nav_keys);
        }
        settings.put_bool(KEY_PRIVACY_GUARD, self.privacy_guard);
    }

    fn on_input(&mut self, input: &PageInput) -> bool {
        let PageInput::SetToggle { key, checked } = input else {
            return false;
        };
        match key.as_str() {
            KEY_SEND_METRICS => {
                self.set_metrics(*checked);
                true
            }
            KEY_APPLY_DEFAULT_THEME => self.set_theme(*checked),
            DISABLE_NAV_KEYS => self.set_nav_keys(*checked),
            KEY_PRIVACY_GUARD => {
                self.set_privacy_guard(*checked);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_infra::StaticHardwareCapabilities;

    fn page(supported: &[HardwareFeature], defaults: ServicesDefaults) -> ServicesPage {
        ServicesPage::new(
            Arc::new(StaticHardwareCapabilities::new(
                supported.iter().copied(),
                std::iter::empty(),
            )),
            defaults,
        )
    }

    #[test]
    fn metrics_default_on_and_theme_hidden_for_system_theme() {
        let mut services = page(
            &[],
            ServicesDefaults {
                default_theme: SYSTEM_THEME.into(),
                theme_checked_by_default: true,
                ..ServicesDefaults::default()
            },
        );
        services.on_load(&SettingsAccumulator::new());

        assert!(services.metrics());
        assert_eq!(services.theme(), None);
        assert!(!services.set_theme(true));
    }

    #[test]
    fn nav_keys_hidden_on_devices_with_navigation_bar() {
        let mut services = page(
            &[HardwareFeature::KeyDisable, HardwareFeature::NavigationBar],
            ServicesDefaults::default(),
        );
        services.on_load(&SettingsAccumulator::new());

        assert_eq!(services.nav_keys(), None);
    }

    #[test]
    fn nav_keys_start_from_platform_value() {
        let mut services = page(
            &[HardwareFeature::KeyDisable],
            ServicesDefaults {
                force_show_navbar: true,
                ..ServicesDefaults::default()
            },
        );
        services.on_load(&SettingsAccumulator::new());

        assert_eq!(services.nav_keys(), Some(true));
    }

    #[test]
    fn earlier_choices_survive_reload() {
        let mut services = page(&[], ServicesDefaults::default());
        let mut acc = SettingsAccumulator::new();
        services.on_load(&acc);
        services.set_metrics(false);
        services.set_privacy_guard(true);
        services.on_leave(false, &mut SettingsWriter::new(&mut acc));

        let mut reloaded = page(&[], ServicesDefaults::default());
        reloaded.on_load(&acc);

        assert!(!reloaded.metrics());
        assert!(reloaded.privacy_guard());
    }

    #[test]
    fn unknown_toggle_is_not_handled() {
        let mut services = page(&[], ServicesDefaults::default());
        services.on_load(&SettingsAccumulator::new());

        assert!(!services.on_input(&PageInput::SetToggle {
            key: "unknown".into(),
            checked: true,
        }));
        assert!(!services.on_input(&PageInput::Refresh));
    }
}
