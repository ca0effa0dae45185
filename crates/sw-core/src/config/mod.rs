//! # Pure Data Module - Data Transfer Objects Only
//!
//! Defines configuration data structures and the TOML -> DTO mapping.
//! No validation, no policy and no default-value calculation lives here;
//! the bootstrap layer decides what an empty value means.

pub mod app_config;

pub use app_config::AppConfig;
