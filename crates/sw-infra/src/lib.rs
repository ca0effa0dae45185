//! Infrastructure adapters for the setup wizard.

pub mod hardware;
pub mod packages;
pub mod settings;
pub mod setup_status;
pub mod time;

pub use hardware::StaticHardwareCapabilities;
pub use packages::StaticPackageControl;
pub use settings::{FileSettingsStore, InMemorySettingsStore};
pub use setup_status::FileSetupStatusRepository;
pub use time::{ReadinessGate, ReadySource};
