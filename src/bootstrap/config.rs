//! # Configuration Loader
//!
//! Reads the TOML file and maps it to the [`AppConfig`] DTO. No validation
//! and no default values: empty fields are facts, the wiring layer fills
//! them in.

use std::path::{Path, PathBuf};

use anyhow::Context;
use sw_core::config::AppConfig;
use tracing::info;

const APP_DIR: &str = "setupwizard";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Default config location under the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Loads `explicit` if given, otherwise the default location. A missing
/// default file yields [`AppConfig::empty`]; a missing explicit file is an
/// error.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => {
            info!("no config file found, using empty configuration");
            Ok(AppConfig::empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [general]
            is_owner = true

            [flow]
            radio_ready_timeout_ms = 1500

            [hardware]
            features = ["wifi", "telephony"]
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert!(config.is_owner);
        assert_eq!(config.radio_ready_timeout_ms, 1500);
        assert_eq!(config.hardware_features, vec!["wifi", "telephony"]);
        assert_eq!(config.settings_path, PathBuf::new());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[general\nis_owner = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("TOML"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(resolve_config(Some(&missing)).is_err());
    }
}
