//! Sample schedule construction.
//!
//! A barcode run samples the source video at N points and maps each sample to
//! one output column. [`SampleSchedule::build`] turns a requested sample count
//! and the probed [`VideoMetadata`] into that mapping, fixed before any worker
//! starts. Two addressing strategies are supported, selected by
//! [`SampleStrategy`]; exactly one is active per run.
//!
//! Column indices are assigned by position in the generated sequence. They are
//! deliberately never re-derived from the sample key — dividing twice with
//! different rounding is how columns end up skipped or written twice.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::error::FilmstripeError;
use crate::metadata::VideoMetadata;

/// Addresses one frame of the source video.
///
/// Exactly one variant is used throughout a run; schedules never mix
/// addressing modes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use]
pub enum SampleKey {
    /// Address by absolute frame index (0-based).
    FrameIndex(u64),
    /// Address by time offset from the start of the video.
    TimeOffset(Duration),
}

impl Display for SampleKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SampleKey::FrameIndex(index) => write!(f, "frame {index}"),
            SampleKey::TimeOffset(offset) => write!(f, "t={:.3}s", offset.as_secs_f64()),
        }
    }
}

/// How sample points are spread across the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleStrategy {
    /// Sample every `frame_count / N`-th frame.
    ///
    /// Requires a reliable frame count; refuses sources that do not report
    /// one. Gives exact frame alignment on constant-frame-rate sources.
    FrameIndex,
    /// Sample every `duration / N` seconds.
    ///
    /// The only strategy usable when per-frame counts are absent or
    /// unreliable (variable-frame-rate sources). Trades exact frame
    /// alignment for duration-proportional spacing. This is the default.
    #[default]
    TimeOffset,
}

/// One entry of a [`SampleSchedule`]: which frame to extract, and which
/// output column its reduced pixels fill.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledSample {
    /// Output column index, in `0..N`.
    pub column: usize,
    /// Where in the video the sample comes from.
    pub key: SampleKey,
}

/// The ordered list of samples for one barcode run.
///
/// Built once, before any worker starts, and read-only thereafter. Column
/// indices are exactly `0..len()`, each appearing once, in ascending order;
/// sample keys are non-decreasing.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use filmstripe::{FrameRate, SampleKey, SampleSchedule, SampleStrategy, VideoMetadata};
///
/// let metadata = VideoMetadata {
///     width: 1920,
///     height: 1080,
///     frame_rate: FrameRate { numerator: 25, denominator: 1 },
///     frame_count: 100,
///     duration: Duration::from_secs(4),
///     codec: "h264".to_string(),
/// };
///
/// let schedule = SampleSchedule::build(10, &metadata, SampleStrategy::FrameIndex)?;
/// assert_eq!(schedule.len(), 10);
/// assert_eq!(schedule.as_slice()[3].key, SampleKey::FrameIndex(30));
/// # Ok::<(), filmstripe::FilmstripeError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct SampleSchedule {
    samples: Vec<ScheduledSample>,
    strategy: SampleStrategy,
}

impl SampleSchedule {
    /// Build a schedule of `sample_count` entries over the given source.
    ///
    /// # Errors
    ///
    /// - [`FilmstripeError::InvalidSampleCount`] if `sample_count` is zero,
    ///   or exceeds the source frame count in frame-index mode — sampling
    ///   cannot exceed source resolution in the discrete case.
    /// - [`FilmstripeError::FrameCountUnavailable`] if frame-index mode is
    ///   requested but the source does not report a frame count.
    pub fn build(
        sample_count: usize,
        metadata: &VideoMetadata,
        strategy: SampleStrategy,
    ) -> Result<Self, FilmstripeError> {
        if sample_count == 0 {
            return Err(FilmstripeError::InvalidSampleCount {
                requested: sample_count,
                available: metadata.frame_count,
            });
        }

        let samples = match strategy {
            SampleStrategy::FrameIndex => {
                let total_frames = metadata.frame_count;
                if total_frames == 0 {
                    return Err(FilmstripeError::FrameCountUnavailable);
                }
                if sample_count as u64 > total_frames {
                    return Err(FilmstripeError::InvalidSampleCount {
                        requested: sample_count,
                        available: total_frames,
                    });
                }

                let stride = total_frames / sample_count as u64;
                (0..sample_count as u64)
                    .map(|c| SampleKey::FrameIndex((c * stride).min(total_frames - 1)))
                    .enumerate()
                    .map(|(column, key)| ScheduledSample { column, key })
                    .collect()
            }
            SampleStrategy::TimeOffset => {
                let interval = metadata.duration.as_secs_f64() / sample_count as f64;
                (0..sample_count)
                    .map(|c| SampleKey::TimeOffset(Duration::from_secs_f64(c as f64 * interval)))
                    .enumerate()
                    .map(|(column, key)| ScheduledSample { column, key })
                    .collect()
            }
        };

        log::debug!(
            "Built {strategy:?} schedule: {sample_count} samples over {:?}",
            metadata.duration
        );

        Ok(Self { samples, strategy })
    }

    /// Number of scheduled samples (the output image width).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the schedule contains no samples.
    ///
    /// Cannot occur for a schedule returned by [`build`](SampleSchedule::build).
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The strategy this schedule was built with.
    pub fn strategy(&self) -> SampleStrategy {
        self.strategy
    }

    /// The scheduled samples in ascending column order.
    pub fn as_slice(&self) -> &[ScheduledSample] {
        &self.samples
    }

    /// Iterate over the scheduled samples in ascending column order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledSample> {
        self.samples.iter()
    }
}
