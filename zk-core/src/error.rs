// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for the cards backend

use serde::Serialize;
use thiserror::Error;

/// Result type alias
pub type ZkResult<T> = Result<T, ZkError>;

/// Coarse error category exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    BackendUnavailable,
}

/// Main error type
#[derive(Error, Debug)]
pub enum ZkError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Conversion failed ({tool}): {message}")]
    Conversion { tool: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZkError::FileNotFound(_) | ZkError::FolderNotFound(_) => ErrorKind::NotFound,
            ZkError::InvalidInput(_) | ZkError::Json(_) | ZkError::Config(_) => {
                ErrorKind::InvalidInput
            }
            ZkError::Io(_) | ZkError::Storage(_) | ZkError::Conversion { .. } => {
                ErrorKind::BackendUnavailable
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
