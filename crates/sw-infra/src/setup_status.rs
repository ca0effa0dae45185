//! File-based setup status repository
//!
//! Persists whether the setup flow has completed as a small JSON file, so a
//! provisioned device does not run the wizard again.

use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use sw_core::{ports::SetupStatusPort, setup::SetupStatus};
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub const DEFAULT_SETUP_STATUS_FILE: &str = ".setup_status";

pub struct FileSetupStatusRepository {
    status_file_path: PathBuf,
}

impl FileSetupStatusRepository {
    pub fn new(status_file_path: PathBuf) -> Self {
        Self { status_file_path }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_SETUP_STATUS_FILE))
    }
}

#[async_trait]
impl SetupStatusPort for FileSetupStatusRepository {
    async fn get_status(&self) -> anyhow::Result<SetupStatus> {
        let content = match fs::read_to_string(&self.status_file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SetupStatus::default())
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!(
                        "read setup status failed: {}",
                        self.status_file_path.display()
                    )
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(SetupStatus::default());
        }

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse setup status: {e}"))
    }

    async fn set_status(&self, status: &SetupStatus) -> anyhow::Result<()> {
        if let Some(parent) = self.status_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(status)
            .context("Failed to serialize setup status")?;

        let mut file = fs::File::create(&self.status_file_path)
            .await
            .context("Failed to create status file")?;
        file.write_all(json.as_bytes())
            .await
            .context("Failed to write status file")?;
        file.sync_all().await.context("Failed to sync status file")?;

        Ok(())
    }
}
