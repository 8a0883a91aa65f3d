//! Errors that end the client.

use thiserror::Error;

use crate::domain::{StorageError, ValueObjectError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValueObjectError),

    #[error("Local storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Terminal input error: {0}")]
    Input(#[from] rustyline::error::ReadlineError),
}
