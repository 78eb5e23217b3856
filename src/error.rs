use std::io;
use thiserror::Error;

use crate::types::ContainerKind;

/// Errors raised while inspecting a container.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("{expected} signature not found")]
    NotThisFormat { expected: ContainerKind },

    #[error("unexpected structure: {0}")]
    UnexpectedStructure(String),

    #[error("invalid header field {field}: {value}")]
    InvalidHeaderField { field: &'static str, value: String },

    #[error("truncated stream: expected {expected} bytes, got {actual}")]
    TruncatedStream { expected: u64, actual: u64 },

    #[error("unrecognized container format")]
    UnrecognizedFormat,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FormatError {
    /// True for a signature mismatch, the only failure a caller may recover
    /// from by trying another format.
    #[inline]
    pub fn is_not_this_format(&self) -> bool {
        matches!(self, Self::NotThisFormat { .. })
    }
}

/// Errors raised while searching for an archive on disk.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("automatic lookup is not supported on {0}; pass the archive path manually")]
    UnsupportedPlatform(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;
