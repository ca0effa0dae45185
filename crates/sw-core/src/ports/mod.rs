//! Port interfaces for the application layer
//!
//! Ports define the contract between the navigation engine and the
//! platform it runs on: the settings provider, the hardware capability
//! service, the package manager, readiness gates, the rendering layer and
//! persisted setup status.
//! Infrastructure crates implement them; the engine only sees the traits.

mod flow_event;
pub mod hardware;
mod package_control;
mod readiness;
mod settings_store;
mod setup_status;

pub use flow_event::FlowEventPort;
pub use hardware::{HardwareCapabilityPort, HardwareError, HardwareFeature};
pub use package_control::{PackageControlPort, PackageError};
pub use readiness::ReadinessPort;
pub use settings_store::SettingsStorePort;
pub use setup_status::SetupStatusPort;

#[cfg(test)]
pub use hardware::MockHardware;
