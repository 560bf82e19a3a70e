//! Error types for fws
//!
//! Provides a unified error type used across the fws crates.

use std::path::PathBuf;

use fws_protocol::{CodecError, DecodeError};

/// Main error type for fws operations
#[derive(Debug, thiserror::Error)]
pub enum FwsError {
    // === IO Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Protocol Errors ===

    #[error("Protocol error: {0}")]
    Codec(#[from] CodecError),

    #[error("Malformed frame: {0}")]
    Decode(#[from] DecodeError),

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FwsError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the peer could recover by retransmitting the frame
    pub fn is_retransmittable(&self) -> bool {
        match self {
            Self::Decode(_) => true,
            Self::Codec(CodecError::Decode(_)) => true,
            _ => false,
        }
    }
}

/// Result type alias using FwsError
pub type Result<T> = std::result::Result<T, FwsError>;
