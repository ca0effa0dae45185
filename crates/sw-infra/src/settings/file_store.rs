use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use sw_core::{ports::SettingsStorePort, SettingValue};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

pub const DEFAULT_SETTINGS_FILE: &str = "platform_settings.json";

/// Platform settings kept as a JSON object of key -> typed value.
pub struct FileSettingsStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

impl FileSettingsStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a store in `base_dir` using the default file name.
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, SettingValue>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read settings failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("parse settings failed: {}", self.path.display()))
    }

    /// Writes to a sibling temp file and renames it over the target, so the
    /// file holds either the old or the new contents.
    async fn atomic_write(&self, content: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create settings dir failed: {}", dir.display()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp settings failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp settings to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl SettingsStorePort for FileSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<SettingValue>> {
        let mut all = self.read_all().await?;
        Ok(all.remove(key))
    }

    async fn put(&self, key: &str, value: &SettingValue) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut all = self.read_all().await?;
        all.insert(key.to_string(), value.clone());

        let content = serde_json::to_string_pretty(&all).context("serialize settings failed")?;
        self.atomic_write(&content).await?;
        debug!(key, %value, "platform setting written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn get_returns_none_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSettingsStore::new(temp_dir.path().join("missing.json"));

        assert_eq!(store.get("send_metrics").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_keeps_existing_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSettingsStore::with_defaults(temp_dir.path().join("nested"));

        store.put("send_metrics", &SettingValue::Bool(true)).await.unwrap();
        store
            .put("captive_portal_detection_enabled", &SettingValue::Int(0))
            .await
            .unwrap();
        store.put("send_metrics", &SettingValue::Bool(false)).await.unwrap();

        assert_eq!(
            store.get("send_metrics").await.unwrap(),
            Some(SettingValue::Bool(false))
        );
        assert_eq!(
            store.get("captive_portal_detection_enabled").await.unwrap(),
            Some(SettingValue::Int(0))
        );
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn invalid_json_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invalid.json");
        fs::write(&path, "{invalid json").await.unwrap();

        let store = FileSettingsStore::new(path);
        let result = store.get("anything").await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parse settings failed"));
    }
}
