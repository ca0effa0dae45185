//! # sw-core
//!
//! Core domain models for the first-run setup wizard.
//!
//! This crate contains the page model, the page list, the pending-settings
//! accumulator and the ports the navigation engine talks through. It has no
//! runtime or I/O dependencies.

pub mod config;
pub mod flow;
pub mod ids;
pub mod page;
pub mod page_list;
pub mod ports;
pub mod settings;
pub mod setup;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use flow::{ActivityOutcome, FlowPhase, RequestCode};
pub use ids::{FlowId, PageKey};
pub use page::{
    Page, PageAction, PageBehavior, PageInput, PageSnapshot, PageState, Position,
};
pub use page_list::{PageList, PageListError, BEFORE_FIRST};
pub use settings::{SettingValue, SettingsAccumulator, SettingsWriter};
