use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("package not installed: {0}")]
    NotFound(String),

    #[error("package manager rejected change: {0}")]
    Rejected(#[from] anyhow::Error),
}

/// Platform package manager, limited to per-user enable state.
#[async_trait]
pub trait PackageControlPort: Send + Sync {
    async fn set_enabled(&self, package: &str, enabled: bool) -> Result<(), PackageError>;
}
