//! Video file probing.
//!
//! [`MediaProbe`] opens a video file, extracts the metadata a barcode run
//! needs — dimensions, frame rate, frame count, duration — and immediately
//! closes the demuxer. The run re-opens the file per worker for extraction,
//! so nothing is kept alive here.

use std::{path::Path, time::Duration};

use ffmpeg_next::{codec::context::Context as CodecContext, media::Type};

use crate::error::FilmstripeError;
use crate::metadata::{FrameRate, VideoMetadata};

/// Lightweight video file probe.
///
/// # Example
///
/// ```no_run
/// use filmstripe::MediaProbe;
///
/// let metadata = MediaProbe::probe("input.mp4")?;
/// println!("{}x{}, {} frames", metadata.width, metadata.height, metadata.frame_count);
/// # Ok::<(), filmstripe::FilmstripeError>(())
/// ```
pub struct MediaProbe;

impl MediaProbe {
    /// Probe a video file and return its metadata.
    ///
    /// The frame count comes from the stream's own `nb_frames` field when the
    /// container reports one, falling back to duration × frame rate, and
    /// finally to `0` meaning "unknown" — which the frame-index sampling
    /// strategy refuses and the time-offset strategy tolerates.
    ///
    /// # Errors
    ///
    /// Returns [`FilmstripeError::ProbeFailed`] if the file cannot be opened
    /// or recognised as a media file, and [`FilmstripeError::NoVideoStream`]
    /// if it contains no video stream.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<VideoMetadata, FilmstripeError> {
        let path = path.as_ref();

        // Initialise ffmpeg (safe to call multiple times).
        ffmpeg_next::init().map_err(|error| FilmstripeError::ProbeFailed {
            path: path.to_path_buf(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| FilmstripeError::ProbeFailed {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(FilmstripeError::NoVideoStream)?;

        // Container-level duration, in AV_TIME_BASE (microsecond) units.
        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        // Prefer the stream's average frame rate; fall back to the raw rate.
        let average_rate = stream.avg_frame_rate();
        let rate = if average_rate.denominator() != 0 {
            average_rate
        } else {
            stream.rate()
        };
        let frame_rate = FrameRate {
            numerator: rate.numerator(),
            denominator: rate.denominator(),
        };

        // nb_frames when the container carries it, duration-derived estimate
        // otherwise, 0 = unknown.
        let reported_frames = stream.frames();
        let frames_per_second = frame_rate.as_f64();
        let frame_count = if reported_frames > 0 {
            reported_frames as u64
        } else if frames_per_second > 0.0 {
            (duration.as_secs_f64() * frames_per_second) as u64
        } else {
            0
        };

        let codec_parameters = stream.parameters();
        let decoder_context =
            CodecContext::from_parameters(codec_parameters).map_err(|error| {
                FilmstripeError::ProbeFailed {
                    path: path.to_path_buf(),
                    reason: format!("Failed to read video codec parameters: {error}"),
                }
            })?;
        let video_decoder =
            decoder_context
                .decoder()
                .video()
                .map_err(|error| FilmstripeError::ProbeFailed {
                    path: path.to_path_buf(),
                    reason: format!("Failed to create video decoder: {error}"),
                })?;

        let width = video_decoder.width();
        let height = video_decoder.height();
        let codec = video_decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        log::debug!(
            "Probed {}: {width}x{height} @ {:.2} fps, {frame_count} frames, {duration:?}",
            path.display(),
            frames_per_second,
        );

        Ok(VideoMetadata {
            width,
            height,
            frame_rate,
            frame_count,
            duration,
            codec,
        })
    }
}
