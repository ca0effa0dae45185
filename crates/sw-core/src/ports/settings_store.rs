use async_trait::async_trait;

use crate::settings::SettingValue;

/// Platform settings provider.
///
/// Best-effort key/value storage with no transactions across keys.
#[async_trait]
pub trait SettingsStorePort: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<SettingValue>>;
    async fn put(&self, key: &str, value: &SettingValue) -> anyhow::Result<()>;
}
