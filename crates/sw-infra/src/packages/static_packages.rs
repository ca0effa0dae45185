//! Package table loaded from configuration.
//!
//! Stands in for the platform package manager on builds without one. Enable
//! state lives in memory for the lifetime of the process.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use sw_core::ports::{PackageControlPort, PackageError};
use tracing::info;

#[derive(Debug, Default)]
pub struct StaticPackageControl {
    installed: HashSet<String>,
    enabled: Mutex<HashMap<String, bool>>,
}

impl StaticPackageControl {
    pub fn new(installed: impl IntoIterator<Item = String>) -> Self {
        Self {
            installed: installed.into_iter().collect(),
            enabled: Mutex::new(HashMap::new()),
        }
    }

    /// `None` for packages that are not installed. Installed packages start
    /// enabled.
    pub fn is_enabled(&self, package: &str) -> Option<bool> {
        if !self.installed.contains(package) {
            return None;
        }
        let enabled = self.enabled.lock().unwrap_or_else(|e| e.into_inner());
        Some(enabled.get(package).copied().unwrap_or(true))
    }
}

#[async_trait]
impl PackageControlPort for StaticPackageControl {
    async fn set_enabled(&self, package: &str, enabled: bool) -> Result<(), PackageError> {
        if !self.installed.contains(package) {
            return Err(PackageError::NotFound(package.to_string()));
        }
        self.enabled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(package.to_string(), enabled);
        info!(package, enabled, "package enable state changed");
        Ok(())
    }
}
