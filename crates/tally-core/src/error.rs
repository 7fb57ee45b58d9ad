//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Insufficient variance: at least {required} expense rows required, got {actual}")]
    InsufficientVariance { required: usize, actual: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
