//! Error types for the `filmstripe` crate.
//!
//! This module defines [`FilmstripeError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry rich context to aid
//! debugging, including file paths, sample keys, and upstream error messages.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

use crate::schedule::SampleKey;

/// The unified error type for all `filmstripe` operations.
///
/// Every public method that can fail returns `Result<T, FilmstripeError>`.
/// Variants carry enough context to diagnose the problem without needing
/// additional logging at the call site.
///
/// All pipeline errors are fatal: a run either produces a complete barcode
/// or no output at all. There is no partial-success path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FilmstripeError {
    /// The video file could not be opened or probed.
    #[error("Failed to probe video file at {path}: {reason}")]
    ProbeFailed {
        /// Path that was passed to [`crate::MediaProbe::probe`].
        path: PathBuf,
        /// Underlying reason the probe failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// The requested sample count cannot be satisfied by the source.
    ///
    /// Raised when zero samples are requested, or when frame-index sampling
    /// asks for more columns than the video has frames.
    #[error("Invalid sample count: requested {requested}, video has {available} frames")]
    InvalidSampleCount {
        /// Number of samples (output columns) that was requested.
        requested: usize,
        /// Total frames available in the source.
        available: u64,
    },

    /// The source does not report a usable frame count.
    ///
    /// Frame-index sampling needs a reliable total; variable-frame-rate
    /// sources frequently do not provide one. Time-offset sampling does not
    /// depend on the frame count and works on such sources.
    #[error("Source reports no reliable frame count; use time-offset sampling instead")]
    FrameCountUnavailable,

    /// Extraction or reduction failed for one scheduled sample.
    ///
    /// Wraps the root error together with the sample it belongs to, so the
    /// diagnostic names which column of the barcode could not be produced.
    #[error("Sample for column {column} ({key}) failed: {source}")]
    SampleFailed {
        /// Output column the sample was scheduled to fill.
        column: usize,
        /// The frame index or time offset that was being extracted.
        key: SampleKey,
        /// The root failure.
        #[source]
        source: Box<FilmstripeError>,
    },

    /// A video frame could not be located or decoded.
    #[error("Failed to decode video frame: {0}")]
    FrameDecode(String),

    /// A decoded frame contained a zero-pixel row.
    ///
    /// Unreachable for any validly decoded frame; guarded defensively in the
    /// reducer.
    #[error("Decoded frame has zero-width rows; nothing to average")]
    EmptyRow,

    /// A reduced column does not match the output grid height.
    #[error("Reduced column height {actual} does not match grid height {expected}")]
    FrameSizeMismatch {
        /// Grid height the column must fill.
        expected: usize,
        /// Height the reducer actually produced.
        actual: usize,
    },

    /// The run was cancelled via a [`CancellationToken`](crate::CancellationToken),
    /// either by the caller or by a sibling worker that hit a fatal error.
    #[error("Operation cancelled")]
    Cancelled,

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// An error from the `image` crate while encoding the output raster.
    #[error("Image processing error: {0}")]
    Image(#[from] ImageError),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

impl From<FfmpegError> for FilmstripeError {
    fn from(error: FfmpegError) -> Self {
        FilmstripeError::Ffmpeg(error.to_string())
    }
}
