use std::sync::Arc;

use sw_core::ports::{PackageControlPort, PackageError};
use tracing::{debug, info, warn};

/// Theme chooser packages that only the device owner may use.
pub const THEME_PACKAGES: [&str; 3] = [
    "org.cyanogenmod.theme.chooser",
    "com.cyngn.theme.chooser",
    "com.cyngn.themestore",
];

/// Disables the theme chooser for secondary users.
pub struct DisableThemePackages {
    packages: Arc<dyn PackageControlPort>,
}

impl DisableThemePackages {
    pub fn new(packages: Arc<dyn PackageControlPort>) -> Self {
        Self { packages }
    }

    /// Does nothing for the owner. Missing packages are ignored and other
    /// failures are logged; returns how many packages were disabled.
    pub async fn execute(&self, is_owner: bool) -> usize {
        if is_owner {
            return 0;
        }

        let mut disabled = 0;
        for package in THEME_PACKAGES {
            match self.packages.set_enabled(package, false).await {
                Ok(()) => disabled += 1,
                Err(PackageError::NotFound(_)) => {
                    debug!(package, "theme package not installed");
                }
                Err(err) => {
                    warn!(package, error = %err, "failed to disable theme package");
                }
            }
        }
        info!(disabled, "theme packages disabled for secondary user");
        disabled
    }
}
