use thiserror::Error;

/// Main error type for the inference CLI.
///
/// Every variant is fatal: the driver never retries and never emits partial
/// output once a load or shape check has failed.
#[derive(Error, Debug)]
pub enum InferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record error: {0}")]
    Record(#[from] burn::record::RecorderError),

    #[error("shape error: {0}")]
    Shape(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported compute target '{0}' (supported: cpu)")]
    Device(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, InferError>;
