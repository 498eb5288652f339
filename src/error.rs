//! Error handling and custom error types
//!
//! Every stage of the request pipeline reports failures through [`Error`];
//! the orchestrator maps any variant to the same error envelope.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("S3 error: {0}")]
    Storage(String),

    #[error("Bedrock error: {0}")]
    Inference(String),

    #[error("Unexpected model response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
