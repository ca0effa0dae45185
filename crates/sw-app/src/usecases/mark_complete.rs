use std::sync::Arc;

use sw_core::ports::{SettingsStorePort, SetupStatusPort};
use sw_core::settings::keys::{DEVICE_PROVISIONED, USER_SETUP_COMPLETE};
use sw_core::SettingValue;
use tracing::warn;

/// Use case for marking setup as complete.
///
/// Updates the persistent setup completion flag and the platform's
/// provisioning settings.
pub struct MarkSetupComplete {
    setup_status: Arc<dyn SetupStatusPort>,
    settings_store: Arc<dyn SettingsStorePort>,
}

impl MarkSetupComplete {
    pub fn new(
        setup_status: Arc<dyn SetupStatusPort>,
        settings_store: Arc<dyn SettingsStorePort>,
    ) -> Self {
        Self {
            setup_status,
            settings_store,
        }
    }

    /// Every write is attempted even when an earlier one fails. The first
    /// failure is returned once all of them ran.
    pub async fn execute(&self) -> anyhow::Result<()> {
        let done = SettingValue::Int(1);
        let mut first_error = None;

        for key in [DEVICE_PROVISIONED, USER_SETUP_COMPLETE] {
            if let Err(err) = self.settings_store.put(key, &done).await {
                warn!(key, error = %err, "failed to write provisioning setting");
                first_error.get_or_insert(err.context(format!("write {key} failed")));
            }
        }

        if let Err(err) = self.persist_status().await {
            warn!(error = %err, "failed to persist setup status");
            first_error.get_or_insert(err);
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn persist_status(&self) -> anyhow::Result<()> {
        let mut status = self.setup_status.get_status().await?;
        status.has_completed = true;
        self.setup_status.set_status(&status).await
    }
}
