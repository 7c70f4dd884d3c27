//! # filmstripe
//!
//! Render movie barcodes — one averaged colour column per sampled video
//! frame, assembled left-to-right into a single image that shows a film's
//! palette over time.
//!
//! `filmstripe` samples a video at N evenly-spaced points, reduces each
//! sampled frame to one pixel per row (the component-wise row average), and
//! writes each reduced column into a shared output grid under a fixed pool
//! of concurrent workers, powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use filmstripe::BarcodeOptions;
//!
//! let options = BarcodeOptions::new();
//! filmstripe::render_to_file("film.mkv", "film_barcode.png", &options).unwrap();
//! ```
//!
//! ## Picking a sampling strategy
//!
//! ```no_run
//! use filmstripe::{BarcodeOptions, SampleStrategy};
//!
//! // Time-offset sampling (the default) spaces samples by duration and
//! // works on any source, including variable-frame-rate ones.
//! let by_time = BarcodeOptions::new().with_strategy(SampleStrategy::TimeOffset);
//!
//! // Frame-index sampling gives exact frame alignment but needs a source
//! // that reports a reliable frame count.
//! let by_frame = BarcodeOptions::new().with_strategy(SampleStrategy::FrameIndex);
//! ```
//!
//! ## Progress and cancellation
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use filmstripe::{BarcodeOptions, CancellationToken, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         eprint!("\rAnalysing frames: {info}");
//!     }
//! }
//!
//! let token = CancellationToken::new();
//! let options = BarcodeOptions::new()
//!     .with_progress(Arc::new(PrintProgress))
//!     .with_cancellation(token.clone());
//!
//! // token.cancel() from another thread stops the run at the next sample.
//! let image = filmstripe::render("film.mkv", &options)?;
//! # Ok::<(), filmstripe::FilmstripeError>(())
//! ```
//!
//! ## How it works
//!
//! - **Probe** — duration, frame count, frame rate, and resolution are read
//!   once up front ([`MediaProbe`]).
//! - **Schedule** — the N samples and their output columns are fixed before
//!   any work starts ([`SampleSchedule`]).
//! - **Dispatch** — a fixed pool of workers takes contiguous column ranges;
//!   each worker owns its own demuxer, extracts and reduces its samples in
//!   order, and writes disjoint columns of the shared grid ([`PixelGrid`]).
//! - **Assemble** — after the join barrier the grid is transposed into the
//!   output image and saved.
//!
//! Failures are fatal by design: a frame that cannot be extracted means the
//! source is not reliably sampleable, so the run stops and no partial image
//! is written.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system, as for any
//! `ffmpeg-next` consumer.

pub mod barcode;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod ffmpeg;
pub mod grid;
pub mod metadata;
pub mod options;
pub mod probe;
pub mod progress;
pub mod reduce;
pub mod schedule;

pub use barcode::{render, render_to_file};
pub use error::FilmstripeError;
pub use extract::{FrameSource, VideoFrameSource};
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use grid::PixelGrid;
pub use metadata::{FrameRate, VideoMetadata};
pub use options::{BarcodeOptions, DEFAULT_SAMPLES, DEFAULT_WORKERS};
pub use probe::MediaProbe;
pub use progress::{CancellationToken, ProgressCallback, ProgressCounter, ProgressInfo};
pub use schedule::{SampleKey, SampleSchedule, SampleStrategy, ScheduledSample};
