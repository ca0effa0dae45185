//! First-run setup wizard binary support: bootstrap and the headless driver.

pub mod bootstrap;
pub mod driver;
