//! The end-to-end barcode pipeline.
//!
//! [`render`] strings the stages together: probe the source, build the sample
//! schedule, size the output grid, dispatch the worker pool, transpose the
//! finished grid into an image. Each stage either completes or fails the
//! whole run — there is no partial barcode, and [`render_to_file`] never
//! touches the output path unless rendering succeeded.

use std::path::Path;

use image::RgbImage;

use crate::dispatch;
use crate::error::FilmstripeError;
use crate::extract::VideoFrameSource;
use crate::grid::PixelGrid;
use crate::options::BarcodeOptions;
use crate::probe::MediaProbe;
use crate::schedule::SampleSchedule;

/// Render a movie barcode for the video at `path`.
///
/// The result is `options.samples` columns wide and as tall as the source
/// video (or `options.height` when set). Column `c` is the row-wise average
/// colour of the frame sampled for column `c`.
///
/// # Errors
///
/// Any probe, scheduling, extraction, or reduction failure aborts the run;
/// see [`FilmstripeError`] for the variants. On error no image is produced.
///
/// # Example
///
/// ```no_run
/// use filmstripe::BarcodeOptions;
///
/// let options = BarcodeOptions::new().with_samples(1280);
/// let image = filmstripe::render("film.mkv", &options)?;
/// image.save("film_barcode.png")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render<P: AsRef<Path>>(
    path: P,
    options: &BarcodeOptions,
) -> Result<RgbImage, FilmstripeError> {
    let path = path.as_ref();

    let metadata = MediaProbe::probe(path)?;
    let schedule = SampleSchedule::build(options.samples, &metadata, options.strategy)?;

    let grid_height = options.height.unwrap_or(metadata.height) as usize;
    let mut grid = PixelGrid::new(grid_height, schedule.len());

    log::info!(
        "Rendering {}x{grid_height} barcode from {} ({:?} strategy)",
        schedule.len(),
        path.display(),
        options.strategy,
    );

    dispatch::run(&schedule, &mut grid, options, || {
        VideoFrameSource::open(path, options.height)
    })?;

    Ok(grid.into_image())
}

/// Render a movie barcode and save it to `output`.
///
/// The image format is inferred from the output extension (PNG, JPEG, BMP,
/// …, anything the `image` crate encodes). The file is only written after
/// the whole grid is complete.
///
/// # Errors
///
/// Everything [`render`] returns, plus [`FilmstripeError::Image`] /
/// [`FilmstripeError::Io`] if encoding or writing the output fails.
pub fn render_to_file<P, Q>(
    input: P,
    output: Q,
    options: &BarcodeOptions,
) -> Result<(), FilmstripeError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let image = render(input, options)?;
    image.save(output.as_ref())?;
    log::info!("Wrote barcode to {}", output.as_ref().display());
    Ok(())
}
