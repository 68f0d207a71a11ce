use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Log file not found: {}", .path.display())]
    LogNotFound { path: PathBuf },

    #[error("failed to read log file {}: {source}", .path.display())]
    ReadLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Failures of the single model invocation. None of them are retried.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("not authorized ({code}): {message}")]
    Auth { code: String, message: String },

    #[error("model invocation rejected ({}): {message}", .code.as_deref().unwrap_or("unknown"))]
    Rejected {
        code: Option<String>,
        message: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
