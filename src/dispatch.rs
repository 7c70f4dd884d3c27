//! Worker-pool dispatch.
//!
//! [`run`] drives one barcode run over a fixed pool of workers: the schedule's
//! column range is split into contiguous half-open spans, one per worker, and
//! each worker owns its span for the run's duration — this is a pool of W
//! long-lived units, not one task per sample.
//!
//! Workers do not communicate. The only shared mutable state is the pixel
//! grid, carved into disjoint `&mut` column ranges before the pool starts,
//! and the atomic progress counter. The rayon `install` + collect pair is the
//! run's single join barrier: the grid is not read until every worker has
//! returned.
//!
//! Failure policy: extraction failures are fatal, not retried — a frame that
//! cannot be seeked-to and decoded means the source is not reliably
//! sampleable. The failing worker trips the shared cancellation token so
//! siblings stop at their next sample boundary, and its root error (naming
//! the failing sample) is what the caller sees.

use image::Rgb;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::error::FilmstripeError;
use crate::extract::FrameSource;
use crate::grid::PixelGrid;
use crate::options::BarcodeOptions;
use crate::progress::{CancellationToken, ProgressCallback, ProgressCounter};
use crate::reduce;
use crate::schedule::{SampleSchedule, ScheduledSample};

/// Fill `grid` by running the schedule across a fixed worker pool.
///
/// `open_source` is called once per worker, on that worker's thread, so every
/// worker gets its own demuxer and decoder — no decode state is shared.
///
/// The effective pool size is `options.workers` clamped to `1..=N`. Each
/// worker processes its span in ascending column order; no ordering holds
/// across workers, and none is needed — every write targets a unique column.
///
/// Blocks until all workers finish or the run fails.
///
/// # Errors
///
/// The first root failure from any worker ([`FilmstripeError::SampleFailed`]
/// naming the sample), or [`FilmstripeError::Cancelled`] when the caller's
/// token stopped the run.
pub fn run<S, F>(
    schedule: &SampleSchedule,
    grid: &mut PixelGrid,
    options: &BarcodeOptions,
    open_source: F,
) -> Result<(), FilmstripeError>
where
    S: FrameSource,
    F: Fn() -> Result<S, FilmstripeError> + Sync,
{
    let sample_count = schedule.len();
    let height = grid.height();
    if sample_count == 0 {
        return Ok(());
    }

    let worker_count = options.workers.clamp(1, sample_count);
    let columns_per_worker = sample_count / worker_count;

    // Carve the schedule and the grid into per-worker spans: half-open
    // column ranges of `columns_per_worker`, the last worker absorbing the
    // remainder. The grid slices are disjoint by construction.
    let mut spans: Vec<(&[ScheduledSample], &mut [Rgb<u8>])> = Vec::with_capacity(worker_count);
    let mut samples_rest = schedule.as_slice();
    let mut cells_rest = grid.as_mut_slice();
    for worker_index in 0..worker_count {
        let span_len = if worker_index == worker_count - 1 {
            samples_rest.len()
        } else {
            columns_per_worker
        };
        let (span, samples_tail) = samples_rest.split_at(span_len);
        let (cells, cells_tail) = cells_rest.split_at_mut(span_len * height);
        samples_rest = samples_tail;
        cells_rest = cells_tail;
        spans.push((span, cells));
    }

    let counter = ProgressCounter::new(sample_count as u64);
    let token = options.cancellation.clone().unwrap_or_default();
    let progress: &dyn ProgressCallback = options.progress.as_ref();

    log::debug!("Dispatching {sample_count} samples across {worker_count} workers");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count)
        .build()
        .map_err(|error| FilmstripeError::Io(std::io::Error::other(error.to_string())))?;

    let results: Vec<Result<(), FilmstripeError>> = pool.install(|| {
        spans
            .into_par_iter()
            .map(|(span, cells)| {
                run_span(span, cells, height, &open_source, &counter, progress, &token)
            })
            .collect()
    });

    // Workers that stopped because a sibling failed report Cancelled; the
    // sibling's root error is the one worth surfacing.
    let mut cancelled = false;
    for result in results {
        match result {
            Ok(()) => {}
            Err(FilmstripeError::Cancelled) => cancelled = true,
            Err(error) => return Err(error),
        }
    }
    if cancelled {
        return Err(FilmstripeError::Cancelled);
    }

    debug_assert_eq!(counter.completed(), sample_count as u64);
    Ok(())
}

/// One worker's unit of work: its span of the schedule, in ascending column
/// order, against its own frame source.
fn run_span<S, F>(
    span: &[ScheduledSample],
    cells: &mut [Rgb<u8>],
    height: usize,
    open_source: &F,
    counter: &ProgressCounter,
    progress: &dyn ProgressCallback,
    token: &CancellationToken,
) -> Result<(), FilmstripeError>
where
    S: FrameSource,
    F: Fn() -> Result<S, FilmstripeError>,
{
    if span.is_empty() {
        return Ok(());
    }
    if token.is_cancelled() {
        return Err(FilmstripeError::Cancelled);
    }

    let mut source = open_source().inspect_err(|_| token.cancel())?;

    for (local_index, sample) in span.iter().enumerate() {
        if token.is_cancelled() {
            return Err(FilmstripeError::Cancelled);
        }

        let column = reduce_sample(&mut source, sample, height)
            .inspect_err(|_| token.cancel())?;
        cells[local_index * height..(local_index + 1) * height].copy_from_slice(&column);

        let info = counter.advance();
        progress.on_progress(&info);
    }

    Ok(())
}

/// Extract, reduce, and size-check one sample, wrapping any failure with the
/// sample it belongs to.
fn reduce_sample<S: FrameSource>(
    source: &mut S,
    sample: &ScheduledSample,
    height: usize,
) -> Result<Vec<Rgb<u8>>, FilmstripeError> {
    let result = source
        .extract(&sample.key)
        .and_then(|frame| reduce::frame_column(&frame))
        .and_then(|column| {
            if column.len() == height {
                Ok(column)
            } else {
                Err(FilmstripeError::FrameSizeMismatch {
                    expected: height,
                    actual: column.len(),
                })
            }
        });

    result.map_err(|error| FilmstripeError::SampleFailed {
        column: sample.column,
        key: sample.key,
        source: Box::new(error),
    })
}
