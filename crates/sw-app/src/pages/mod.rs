//! Concrete setup pages.
//!
//! Each page kind implements [`PageBehavior`](sw_core::PageBehavior). Pages get
//! their platform collaborators through [`PageEnv`] at construction and keep
//! only transient UI state of their own; everything that outlives a visit
//! goes through the settings accumulator.

mod finish;
mod fingerprint;
mod lockscreen;
mod mobile_data;
mod services;
mod tree;
mod welcome;
mod wifi;

use std::sync::Arc;

use sw_core::ports::{HardwareCapabilityPort, ReadinessPort};

pub use finish::FinishPage;
pub use fingerprint::FingerprintPage;
pub use lockscreen::LockscreenPage;
pub use mobile_data::MobileDataPage;
pub use services::{load_services_defaults, ServicesDefaults, ServicesPage};
pub use tree::{default_page_tree, keys};
pub use welcome::WelcomePage;
pub use wifi::WifiPage;

/// Platform collaborators shared by the page kinds.
#[derive(Clone)]
pub struct PageEnv {
    pub hardware: Arc<dyn HardwareCapabilityPort>,
    pub radio: Arc<dyn ReadinessPort>,
    pub services: ServicesDefaults,
}
