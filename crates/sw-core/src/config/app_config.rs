use std::path::PathBuf;

use tracing::warn;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Whether the flow runs for the device owner (primary user)
    pub is_owner: bool,

    /// Radio readiness timeout in milliseconds (0 means "not configured")
    pub radio_ready_timeout_ms: u64,

    /// Platform settings file (path info only, no existence check)
    pub settings_path: PathBuf,

    /// Setup status file (path info only, no existence check)
    pub status_path: PathBuf,

    /// Hardware feature names reported as supported, as written in the file
    pub hardware_features: Vec<String>,

    /// Hardware feature names reported as currently enabled
    pub hardware_enabled: Vec<String>,

    /// Package name of the default theme ("system" hides the theme toggle)
    pub default_theme: String,

    /// Whether the default-theme toggle starts checked
    pub theme_checked_by_default: bool,

    /// Packages installed for the current user, for builds without a package manager
    pub installed_packages: Vec<String>,

    /// Directory for log files (empty disables file logging)
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// Must not contain validation or default value logic. Empty strings are
    /// valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let bool_at = |section: &str, key: &str| -> bool {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        };
        let list_at = |section: &str, key: &str| -> Vec<String> {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };

        Ok(Self {
            is_owner: bool_at("general", "is_owner"),
            radio_ready_timeout_ms: millis_at(toml_value, "flow", "radio_ready_timeout_ms"),
            settings_path: PathBuf::from(str_at("storage", "settings_path")),
            status_path: PathBuf::from(str_at("storage", "status_path")),
            hardware_features: list_at("hardware", "features"),
            hardware_enabled: list_at("hardware", "enabled"),
            default_theme: str_at("services", "default_theme"),
            theme_checked_by_default: bool_at("services", "theme_checked_by_default"),
            installed_packages: list_at("packages", "installed"),
            log_dir: PathBuf::from(str_at("logging", "log_dir")),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            is_owner: false,
            radio_ready_timeout_ms: 0,
            settings_path: PathBuf::new(),
            status_path: PathBuf::new(),
            hardware_features: Vec::new(),
            hardware_enabled: Vec::new(),
            default_theme: String::new(),
            theme_checked_by_default: false,
            installed_packages: Vec::new(),
            log_dir: PathBuf::new(),
        }
    }
}

/// Negative values cannot be a duration; they are reported and read as 0 so
/// the wiring layer applies its default.
fn millis_at(toml_value: &toml::Value, section: &str, key: &str) -> u64 {
    let Some(raw) = toml_value
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_integer())
    else {
        return 0;
    };
    u64::try_from(raw).unwrap_or_else(|_| {
        warn!(section, key, value = raw, "negative duration in config, using default");
        0
    })
}
