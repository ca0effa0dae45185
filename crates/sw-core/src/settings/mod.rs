//! Setting values, the pending-settings accumulator and well-known keys.

mod accumulator;
pub mod keys;
mod value;

pub use accumulator::{SettingsAccumulator, SettingsWriter};
pub use value::SettingValue;
