//! Single-frame extraction.
//!
//! [`FrameSource`] is the seam between the sampling pipeline and the decoder:
//! the dispatcher only ever asks "give me the frame for this key". The
//! production implementation, [`VideoFrameSource`], holds one FFmpeg demuxer
//! and answers by seeking to the nearest keyframe before the target and
//! decoding forward. Tests substitute deterministic in-memory sources.
//!
//! Each worker owns its own `VideoFrameSource` — demuxer and decoder state is
//! never shared across threads.

use std::path::Path;
use std::time::Duration;

use ffmpeg_next::{
    Rational,
    codec::context::Context as CodecContext,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;

use crate::error::FilmstripeError;
use crate::schedule::SampleKey;

/// A source of decoded frames, addressed by [`SampleKey`].
///
/// Extraction is blocking and strictly sequential per source: a worker never
/// has two calls in flight. Seeking is best-effort — the frame returned is
/// the first decodable frame at or past the requested position.
pub trait FrameSource {
    /// Extract the frame addressed by `key` as an RGB8 image.
    fn extract(&mut self, key: &SampleKey) -> Result<RgbImage, FilmstripeError>;
}

/// FFmpeg-backed [`FrameSource`] over one opened video file.
///
/// Holds the demuxer for the lifetime of the worker; a fresh decoder and
/// RGB24 scaler are built per extraction so no decode state leaks between
/// samples that may be far apart in the stream.
pub struct VideoFrameSource {
    input_context: Input,
    video_stream_index: usize,
    frames_per_second: f64,
    target_width: u32,
    target_height: u32,
}

impl VideoFrameSource {
    /// Open a video file for frame extraction.
    ///
    /// Decoded frames are scaled to the source width by `target_height`
    /// (source height when `None`) before being returned.
    ///
    /// # Errors
    ///
    /// Returns [`FilmstripeError::ProbeFailed`] if the file cannot be opened
    /// and [`FilmstripeError::NoVideoStream`] if it has no video stream.
    pub fn open<P: AsRef<Path>>(
        path: P,
        target_height: Option<u32>,
    ) -> Result<Self, FilmstripeError> {
        let path = path.as_ref();

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
        let video_stream_index = stream.index();

        let average_rate = stream.avg_frame_rate();
        let rate = if average_rate.denominator() != 0 {
            average_rate
        } else {
            stream.rate()
        };
        let frames_per_second = if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            0.0
        };

        let decoder_context = CodecContext::from_parameters(stream.parameters())?;
        let decoder = decoder_context.decoder().video()?;
        let source_width = decoder.width();
        let source_height = decoder.height();

        Ok(Self {
            input_context,
            video_stream_index,
            frames_per_second,
            target_width: source_width,
            target_height: target_height.unwrap_or(source_height),
        })
    }
}

impl FrameSource for VideoFrameSource {
    fn extract(&mut self, key: &SampleKey) -> Result<RgbImage, FilmstripeError> {
        let video_stream_index = self.video_stream_index;
        let frames_per_second = self.frames_per_second;
        let target_width = self.target_width;
        let target_height = self.target_height;

        let stream = self
            .input_context
            .stream(video_stream_index)
            .ok_or(FilmstripeError::NoVideoStream)?;
        let time_base = stream.time_base();
        let codec_parameters = stream.parameters();
        let decoder_context = CodecContext::from_parameters(codec_parameters)?;
        let mut decoder = decoder_context.decoder().video()?;

        // Source format → tightly-specified RGB24 at the output resolution.
        let mut scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            target_width,
            target_height,
            ScalingFlags::BILINEAR,
        )?;

        let target_timestamp = match key {
            SampleKey::FrameIndex(_) if frames_per_second <= 0.0 => {
                return Err(FilmstripeError::FrameDecode(
                    "Source reports no frame rate; cannot address frames by index".to_string(),
                ));
            }
            SampleKey::FrameIndex(index) => {
                frame_index_to_stream_timestamp(*index, frames_per_second, time_base)
            }
            SampleKey::TimeOffset(offset) => duration_to_stream_timestamp(*offset, time_base),
        };

        // Seek to the nearest keyframe before the target, then decode forward
        // until we reach or pass it.
        self.input_context.seek(target_timestamp, ..target_timestamp)?;

        let reached = |pts: i64| match key {
            SampleKey::FrameIndex(index) => {
                pts_to_frame_index(pts, time_base, frames_per_second) >= *index
            }
            SampleKey::TimeOffset(_) => pts >= target_timestamp,
        };

        let mut decoded_frame = VideoFrame::empty();
        let mut rgb_frame = VideoFrame::empty();

        for (stream, packet) in self.input_context.packets() {
            if stream.index() != video_stream_index {
                continue;
            }

            decoder.send_packet(&packet)?;

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                if reached(decoded_frame.pts().unwrap_or(0)) {
                    scaler.run(&decoded_frame, &mut rgb_frame)?;
                    return convert_frame_to_image(&rgb_frame, target_width, target_height);
                }
            }
        }

        // Flush the decoder: the target may sit in its delay queue.
        decoder.send_eof()?;
        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            if reached(decoded_frame.pts().unwrap_or(0)) {
                scaler.run(&decoded_frame, &mut rgb_frame)?;
                return convert_frame_to_image(&rgb_frame, target_width, target_height);
            }
        }

        Err(FilmstripeError::FrameDecode(format!(
            "Could not locate {key} in the video stream"
        )))
    }
}

/// Convert a scaled RGB24 video frame to an [`image::RgbImage`].
fn convert_frame_to_image(
    rgb_frame: &VideoFrame,
    width: u32,
    height: u32,
) -> Result<RgbImage, FilmstripeError> {
    let buffer = frame_to_rgb_buffer(rgb_frame, width, height);
    RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        FilmstripeError::FrameDecode(
            "Failed to construct RGB image from decoded frame data".to_string(),
        )
    })
}

/// Copy pixel data from an FFmpeg video frame into a tightly-packed RGB
/// buffer, stripping any per-row stride padding.
fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let expected_stride = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == expected_stride {
        data[..expected_stride * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(expected_stride * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + expected_stride]);
        }
        buffer
    }
}

/// Convert a [`Duration`] to a timestamp in the stream's time base.
fn duration_to_stream_timestamp(duration: Duration, time_base: Rational) -> i64 {
    let seconds = duration.as_secs_f64();
    let numerator = time_base.numerator() as f64;
    let denominator = time_base.denominator() as f64;
    (seconds * denominator / numerator) as i64
}

/// Convert a frame index to a timestamp in the stream's time base.
fn frame_index_to_stream_timestamp(index: u64, frames_per_second: f64, time_base: Rational) -> i64 {
    let seconds = index as f64 / frames_per_second;
    duration_to_stream_timestamp(Duration::from_secs_f64(seconds), time_base)
}

/// Rescale a PTS value to a frame index.
fn pts_to_frame_index(pts: i64, time_base: Rational, frames_per_second: f64) -> u64 {
    let seconds = pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64;
    (seconds * frames_per_second) as u64
}
