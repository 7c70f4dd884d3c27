//! Video metadata types.
//!
//! This module defines the metadata structure returned by
//! [`MediaProbe::probe`](crate::MediaProbe::probe). Metadata is extracted once
//! per run, before the sample schedule is built, and is read-only from then
//! on — every worker sees the same immutable snapshot.

use std::time::Duration;

/// A stream frame rate as the exact rational the container reports.
///
/// Kept as numerator/denominator rather than a pre-collapsed `f64` because
/// NTSC-style rates (30000/1001) do not round-trip through floats cleanly
/// and the sample arithmetic wants the source facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FrameRate {
    /// Frame rate numerator (e.g. `30000`).
    pub numerator: i32,
    /// Frame rate denominator (e.g. `1001`).
    pub denominator: i32,
}

impl FrameRate {
    /// The frame rate as frames per second.
    ///
    /// Returns `0.0` when the denominator is zero (unknown rate).
    pub fn as_f64(&self) -> f64 {
        if self.denominator != 0 {
            self.numerator as f64 / self.denominator as f64
        } else {
            0.0
        }
    }
}

/// Metadata for the video stream of a media file.
///
/// # Example
///
/// ```no_run
/// use filmstripe::MediaProbe;
///
/// let metadata = MediaProbe::probe("input.mp4")?;
/// println!(
///     "{}x{} @ {:.2} fps, {:?} long",
///     metadata.width,
///     metadata.height,
///     metadata.frame_rate.as_f64(),
///     metadata.duration,
/// );
/// # Ok::<(), filmstripe::FilmstripeError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second as the stream's exact rational.
    pub frame_rate: FrameRate,
    /// Total number of frames. `0` means the container does not report a
    /// reliable count (common for variable-frame-rate sources); frame-index
    /// sampling refuses such sources.
    pub frame_count: u64,
    /// Total duration of the video stream's container.
    pub duration: Duration,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
}
