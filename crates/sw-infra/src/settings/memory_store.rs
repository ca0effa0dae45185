use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use sw_core::{ports::SettingsStorePort, SettingValue};

/// In-memory settings store.
///
/// Keys listed through [`InMemorySettingsStore::fail_on`] reject writes,
/// which lets callers exercise best-effort flushing.
#[derive(Default)]
pub struct InMemorySettingsStore {
    values: Mutex<HashMap<String, SettingValue>>,
    failing: Mutex<HashSet<String>>,
    writes: Mutex<Vec<String>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: impl IntoIterator<Item = (String, SettingValue)>) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend(values);
        store
    }

    pub fn fail_on(&self, key: &str) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string());
    }

    pub fn value(&self, key: &str) -> Option<SettingValue> {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    /// Keys of successful writes, in the order they happened.
    pub fn write_log(&self) -> Vec<String> {
        self.writes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl SettingsStorePort for InMemorySettingsStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<SettingValue>> {
        Ok(self.value(key))
    }

    async fn put(&self, key: &str, value: &SettingValue) -> anyhow::Result<()> {
        if self
            .failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(key)
        {
            anyhow::bail!("settings provider rejected write for {key}");
        }
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.clone());
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(key.to_string());
        Ok(())
    }
}
