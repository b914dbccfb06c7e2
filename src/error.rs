//! Error types for the `lyrsync` crate.
//!
//! This module defines [`LyrsyncError`], the unified error type returned by the
//! fallible operations in the crate. Parsing itself never fails — malformed
//! subtitle blocks are dropped, not surfaced — so errors here come from the
//! surrounding concerns: file reading, plan construction, and cue export.

use std::{io::Error as IoError, path::PathBuf};

use thiserror::Error;

/// The unified error type for all `lyrsync` operations.
///
/// Every public method that can fail returns `Result<T, LyrsyncError>`.
/// Variants carry enough context to diagnose the problem without needing
/// additional logging at the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LyrsyncError {
    /// A subtitle track file could not be read.
    #[error("Failed to read subtitle file at {path}: {source}")]
    FileRead {
        /// Path that was passed to the loading function.
        path: PathBuf,
        /// Underlying I/O error.
        source: IoError,
    },

    /// A frame rate of zero was supplied where frames must be counted.
    #[error("Invalid frame rate: {fps} (must be at least 1)")]
    InvalidFrameRate {
        /// The offending frame rate.
        fps: u32,
    },

    /// A render plan has no duration source (no audio duration and an
    /// empty primary timeline).
    #[error("Cannot build render plan: no audio duration and no timed lines")]
    EmptyPlan,

    /// The operation was cancelled via a [`CancellationToken`](crate::CancellationToken).
    #[error("Operation cancelled")]
    Cancelled,

    /// An I/O error occurred while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
