pub mod static_caps;

pub use static_caps::StaticHardwareCapabilities;
