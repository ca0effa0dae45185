//! Setup flow use cases.

mod captive_portal;
pub mod flow;
mod mark_complete;
mod theme_packages;

pub use captive_portal::DisableCaptivePortal;
pub use flow::{FlowController, FlowDeps, FlowError, FlowSnapshot};
pub use mark_complete::MarkSetupComplete;
pub use theme_packages::{DisableThemePackages, THEME_PACKAGES};
