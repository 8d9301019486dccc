use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors from the fallible edges of the crate: config loading, report
/// rendering, CLI I/O. The scan pipeline itself is infallible by design and
/// returns degenerate results instead of errors.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ScanError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
