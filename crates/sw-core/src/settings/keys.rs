//! Platform setting names written by the setup flow.

pub const KEY_DETECT_CAPTIVE_PORTAL: &str = "captive_portal_detection_enabled";
pub const KEY_SEND_METRICS: &str = "send_metrics";
pub const DISABLE_NAV_KEYS: &str = "disable_nav_keys";
pub const KEY_APPLY_DEFAULT_THEME: &str = "apply_default_theme";
pub const KEY_PRIVACY_GUARD: &str = "privacy_guard_default";

/// Secure setting forcing the on-screen navigation bar.
pub const DEV_FORCE_SHOW_NAVBAR: &str = "dev_force_show_navbar";

pub const KEY_LOCKSCREEN_SET: &str = "lockscreen_configured";
pub const KEY_WIFI_CONNECTED: &str = "wifi_connected";
pub const KEY_FINGERPRINT_ENROLLED: &str = "fingerprint_enrolled";
pub const KEY_MOBILE_DATA_ENABLED: &str = "mobile_data";

pub const DEVICE_PROVISIONED: &str = "device_provisioned";
pub const USER_SETUP_COMPLETE: &str = "user_setup_complete";
