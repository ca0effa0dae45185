//! Setup wizard application layer
//!
//! This crate contains the navigation engine and the concrete setup pages.

pub mod pages;
pub mod usecases;

pub use usecases::{
    DisableCaptivePortal, DisableThemePackages, FlowController, FlowDeps, FlowError, FlowSnapshot,
    MarkSetupComplete,
};
