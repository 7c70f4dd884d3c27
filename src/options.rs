//! Run configuration.
//!
//! [`BarcodeOptions`] is a builder that threads the sample count, sampling
//! strategy, worker pool size, progress callback, and cancellation token
//! through a render without polluting every function signature.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use filmstripe::{BarcodeOptions, ProgressCallback, ProgressInfo, SampleStrategy};
//!
//! struct PrintProgress;
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         eprint!("\rAnalysing frames: {info}");
//!     }
//! }
//!
//! let options = BarcodeOptions::new()
//!     .with_samples(1280)
//!     .with_strategy(SampleStrategy::TimeOffset)
//!     .with_workers(4)
//!     .with_progress(Arc::new(PrintProgress));
//!
//! let image = filmstripe::render("input.mp4", &options)?;
//! # Ok::<(), filmstripe::FilmstripeError>(())
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::progress::{CancellationToken, NoOpProgress, ProgressCallback};
use crate::schedule::SampleStrategy;

/// Default number of samples — one column per pixel of a 1080p-wide image.
pub const DEFAULT_SAMPLES: usize = 1920;

/// Default size of the worker pool.
pub const DEFAULT_WORKERS: usize = 8;

/// Configuration for one barcode run.
///
/// A default-constructed value reproduces the classic behaviour: 1920
/// samples, time-offset spacing, 8 workers, full source height.
#[derive(Clone)]
pub struct BarcodeOptions {
    /// Number of samples to take — the output image width in pixels.
    pub(crate) samples: usize,
    /// How sample points are spread across the video.
    pub(crate) strategy: SampleStrategy,
    /// Fixed worker pool size. Clamped to the sample count at dispatch.
    pub(crate) workers: usize,
    /// Output barcode height. `None` keeps the source height.
    pub(crate) height: Option<u32>,
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// Cancellation token. `None` means only a worker failure can stop the run.
    pub(crate) cancellation: Option<CancellationToken>,
}

impl Debug for BarcodeOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BarcodeOptions")
            .field("samples", &self.samples)
            .field("strategy", &self.strategy)
            .field("workers", &self.workers)
            .field("height", &self.height)
            .field("has_cancellation", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl BarcodeOptions {
    /// Create options with default settings.
    ///
    /// Defaults: [`DEFAULT_SAMPLES`] samples, time-offset strategy,
    /// [`DEFAULT_WORKERS`] workers, source height, no progress callback,
    /// no cancellation.
    pub fn new() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            strategy: SampleStrategy::default(),
            workers: DEFAULT_WORKERS,
            height: None,
            progress: Arc::new(NoOpProgress),
            cancellation: None,
        }
    }

    /// Set the number of samples (output columns).
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the sampling strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SampleStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the worker pool size.
    ///
    /// Clamped to a minimum of 1 and to the sample count at dispatch time.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Scale the barcode to a fixed height instead of the source height.
    ///
    /// Frames are scaled before reduction, so each output pixel still
    /// averages the full source row it represents.
    #[must_use]
    pub fn with_height(mut self, height: Option<u32>) -> Self {
        self.height = height;
        self
    }

    /// Attach a progress callback.
    ///
    /// Invoked from worker threads once per completed sample.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token.
    ///
    /// When the token is cancelled, workers stop at their next sample
    /// boundary and the run returns
    /// [`FilmstripeError::Cancelled`](crate::FilmstripeError::Cancelled).
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Number of samples this run will take.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// The configured sampling strategy.
    pub fn strategy(&self) -> SampleStrategy {
        self.strategy
    }
}
