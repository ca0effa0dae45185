pub mod static_packages;

pub use static_packages::StaticPackageControl;
