//! Persisted setup completion status.

mod status;

pub use status::SetupStatus;
