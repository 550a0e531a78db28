//! Error types for the entire crate.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::units::UnitKind;
use thiserror::Error;

/// Errors that can occur when constructing quantity ranges
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("range start must be strictly less than end (start {start}, end {end})")]
    EmptyRange { start: f64, end: f64 },

    #[error("quantity kind mismatch: expected {expected:?}, found {actual:?}")]
    KindMismatch { expected: UnitKind, actual: UnitKind },

    #[error("pixel extent must be positive, found {0}")]
    InvalidPixelExtent(f64),

    #[error("subdivider count must be at least 1, found {0}")]
    InvalidSubdividerCount(usize),
}

/// Errors that can occur while reading a recording file
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid recording format: {0}")]
    InvalidFormat(String),

    #[error("unsupported schema version: {0}")]
    UnsupportedVersion(String),

    #[error("recording contains no events")]
    NoEvents,
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("empty stack data")]
    EmptyStacks,

    #[error("flamegraph rendering failed: {0}")]
    RenderFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("invalid output path: {0}")]
    InvalidPath(String),
}
