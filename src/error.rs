use std::io;
use thiserror::Error;

use crate::models::responder::ResponderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),

    #[error(transparent)]
    Responder(#[from] ResponderError),
}

pub type Result<T> = std::result::Result<T, AppError>;
