pub mod file_store;
pub mod memory_store;

pub use file_store::FileSettingsStore;
pub use memory_store::InMemorySettingsStore;
