//! # Dependency Injection
//!
//! Creates the infra adapters and hands them out as port trait objects.
//! This is the only module that depends on sw-infra and sw-app at once; it
//! assembles, it does not decide.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sw_core::config::AppConfig;
use sw_core::ports::{
    HardwareCapabilityPort, PackageControlPort, SettingsStorePort, SetupStatusPort,
};
use sw_infra::settings::file_store::DEFAULT_SETTINGS_FILE;
use sw_infra::setup_status::DEFAULT_SETUP_STATUS_FILE;
use sw_infra::time::readiness::RADIO_READY_TIMEOUT;
use sw_infra::{
    FileSettingsStore, FileSetupStatusRepository, ReadinessGate, StaticHardwareCapabilities,
    StaticPackageControl,
};

const APP_DIR: &str = "setupwizard";

pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("no data directory available for {0}")]
    NoDataDir(&'static str),
}

/// Adapters behind the ports the flow needs.
pub struct WiredPorts {
    pub settings_store: Arc<dyn SettingsStorePort>,
    pub setup_status: Arc<dyn SetupStatusPort>,
    pub hardware: Arc<dyn HardwareCapabilityPort>,
    pub packages: Arc<dyn PackageControlPort>,
    pub radio: Arc<ReadinessGate>,
}

/// Builds the adapters. Must run inside a tokio runtime since the radio gate
/// arms its timer right away.
pub fn wire_ports(config: &AppConfig) -> WiringResult<WiredPorts> {
    let settings_path = resolve_path(&config.settings_path, DEFAULT_SETTINGS_FILE, "settings")?;
    let status_path = resolve_path(&config.status_path, DEFAULT_SETUP_STATUS_FILE, "status")?;
    let radio_timeout = match config.radio_ready_timeout_ms {
        0 => RADIO_READY_TIMEOUT,
        ms => Duration::from_millis(ms),
    };

    tracing::debug!(
        settings = %settings_path.display(),
        status = %status_path.display(),
        radio_timeout_ms = radio_timeout.as_millis() as u64,
        "wiring adapters"
    );

    Ok(WiredPorts {
        settings_store: Arc::new(FileSettingsStore::new(settings_path)),
        setup_status: Arc::new(FileSetupStatusRepository::new(status_path)),
        hardware: Arc::new(StaticHardwareCapabilities::from_names(
            &config.hardware_features,
            &config.hardware_enabled,
        )),
        packages: Arc::new(StaticPackageControl::new(
            config.installed_packages.iter().cloned(),
        )),
        radio: Arc::new(ReadinessGate::radio_with_timeout(radio_timeout)),
    })
}

fn resolve_path(
    configured: &Path,
    default_file: &str,
    what: &'static str,
) -> WiringResult<PathBuf> {
    if !configured.as_os_str().is_empty() {
        return Ok(configured.to_path_buf());
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR).join(default_file))
        .ok_or(WiringError::NoDataDir(what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn configured_paths_are_used_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::empty();
        config.settings_path = dir.path().join("s.json");
        config.status_path = dir.path().join("status");
        config.hardware_features = vec!["wifi".into()];
        config.installed_packages = vec!["com.cyngn.themestore".into()];

        let ports = wire_ports(&config).unwrap();

        assert!(ports.settings_store.get("missing").await.unwrap().is_none());
        assert!(!ports.setup_status.get_status().await.unwrap().has_completed);
        assert!(ports
            .hardware
            .is_supported(sw_core::ports::HardwareFeature::Wifi)
            .unwrap());
        assert!(ports
            .packages
            .set_enabled("com.cyngn.themestore", false)
            .await
            .is_ok());
        assert!(ports
            .packages
            .set_enabled("org.cyanogenmod.theme.chooser", false)
            .await
            .is_err());
    }

    #[test]
    fn configured_path_wins_over_default() {
        let configured = PathBuf::from("/tmp/custom.json");
        assert_eq!(
            resolve_path(&configured, DEFAULT_SETTINGS_FILE, "settings").unwrap(),
            configured
        );
    }
}
