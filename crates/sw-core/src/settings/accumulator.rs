//! Pending settings collected across pages.
//!
//! The accumulator is owned by the flow controller. Pages read it when they
//! load and write to it only through [`SettingsWriter`] when they are left.
//! It is consumed by [`SettingsAccumulator::into_entries`] for the single
//! flush at the end of the flow.

use std::collections::BTreeMap;

use super::SettingValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsAccumulator {
    // Sorted so flushes and logs are deterministic.
    entries: BTreeMap<String, SettingValue>,
}

impl SettingsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any earlier write.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(SettingValue::as_bool)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Consumes the accumulator, yielding entries sorted by key.
    pub fn into_entries(self) -> Vec<(String, SettingValue)> {
        self.entries.into_iter().collect()
    }
}

/// Write handle given to a page while it is being left.
pub struct SettingsWriter<'a> {
    inner: &'a mut SettingsAccumulator,
}

impl<'a> SettingsWriter<'a> {
    pub fn new(inner: &'a mut SettingsAccumulator) -> Self {
        Self { inner }
    }

    pub fn put_bool(&mut self, key: &str, value: bool) {
        self.inner.put(key, value);
    }

    pub fn put_int(&mut self, key: &str, value: i64) {
        self.inner.put(key, value);
    }

    pub fn put_string(&mut self, key: &str, value: impl Into<String>) {
        self.inner.put(key, SettingValue::Str(value.into()));
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.inner.get_bool(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }
}
