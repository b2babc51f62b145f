//! Error types for upload session commands

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("index {index} out of range for {len} files")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown output format: {0}")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
