use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionerError {
    #[error("config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("report persistence failed: {0}")]
    Report(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProvisionerError>;
