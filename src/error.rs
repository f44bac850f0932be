use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Path does not exist: {0}")]
    TargetNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ScanError {
    /// Process exit code for a fatal error.
    ///
    /// A missing target shares exit code 1 with a failing verdict; anything
    /// else is a tool malfunction and exits 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TargetNotFound(_) => 1,
            _ => 2,
        }
    }
}
