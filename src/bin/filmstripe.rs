use std::{path::Path, path::PathBuf, sync::Arc};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use filmstripe::{
    BarcodeOptions, FfmpegLogLevel, MediaProbe, ProgressCallback, ProgressInfo, SampleStrategy,
};

const CLI_AFTER_HELP: &str = "Examples:\n  filmstripe --filename film.mkv\n  filmstripe --filename film.mkv --numframes 1280 --out film.png --progress\n  filmstripe --filename film.mkv --strategy frame --workers 4\n  filmstripe --filename film.mkv --probe --json";

#[derive(Debug, Parser)]
#[command(
    name = "filmstripe",
    version,
    about = "Render a movie barcode - one averaged colour column per sampled frame",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Video file to generate the barcode from.
    #[arg(long)]
    filename: PathBuf,

    /// Number of frames to sample - effectively the image width.
    #[arg(long, default_value_t = filmstripe::DEFAULT_SAMPLES)]
    numframes: usize,

    /// Output image path (format inferred from the extension).
    #[arg(long, default_value = "barcode.png")]
    out: PathBuf,

    /// Sampling strategy (time | frame).
    #[arg(long, default_value = "time")]
    strategy: String,

    /// Worker pool size.
    #[arg(long, default_value_t = filmstripe::DEFAULT_WORKERS)]
    workers: usize,

    /// Scale the barcode to this height instead of the source height.
    #[arg(long)]
    height: Option<u32>,

    /// Show a progress bar.
    #[arg(long)]
    progress: bool,

    /// Print source metadata and exit without rendering.
    #[arg(long)]
    probe: bool,

    /// With --probe, output metadata as machine-readable JSON.
    #[arg(long)]
    json: bool,

    /// Allow overwriting an existing output file.
    #[arg(long)]
    overwrite: bool,

    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_strategy(value: &str) -> Option<SampleStrategy> {
    match value.to_ascii_lowercase().as_str() {
        "time" | "time-offset" => Some(SampleStrategy::TimeOffset),
        "frame" | "frame-index" => Some(SampleStrategy::FrameIndex),
        _ => None,
    }
}

fn parse_log_level(value: &str) -> Option<FfmpegLogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "quiet" => Some(FfmpegLogLevel::Quiet),
        "panic" => Some(FfmpegLogLevel::Panic),
        "fatal" => Some(FfmpegLogLevel::Fatal),
        "error" => Some(FfmpegLogLevel::Error),
        "warning" | "warn" => Some(FfmpegLogLevel::Warning),
        "info" => Some(FfmpegLogLevel::Info),
        "verbose" => Some(FfmpegLogLevel::Verbose),
        "debug" => Some(FfmpegLogLevel::Debug),
        "trace" => Some(FfmpegLogLevel::Trace),
        _ => None,
    }
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

/// Bridges the library's progress callback onto an indicatif bar.
struct BarProgress {
    bar: ProgressBar,
}

impl ProgressCallback for BarProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.bar.set_position(info.completed);
    }
}

fn print_metadata(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = MediaProbe::probe(&cli.filename)?;

    if cli.json {
        let payload = json!({
            "width": metadata.width,
            "height": metadata.height,
            "fps": metadata.frame_rate.as_f64(),
            "frame_rate": {
                "numerator": metadata.frame_rate.numerator,
                "denominator": metadata.frame_rate.denominator,
            },
            "frame_count": metadata.frame_count,
            "duration_seconds": metadata.duration.as_secs_f64(),
            "codec": metadata.codec,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "Video: {}x{} @ {:.2} fps [{}]",
            metadata.width,
            metadata.height,
            metadata.frame_rate.as_f64(),
            metadata.codec,
        );
        println!("Duration: {:?}", metadata.duration);
        if metadata.frame_count > 0 {
            println!("Frames: {}", metadata.frame_count);
        } else {
            println!("Frames: unknown (use --strategy time)");
        }
    }

    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // FFmpeg chatters on stderr during seeks; keep it quiet unless asked.
    let ffmpeg_level = match &cli.log_level {
        Some(level) => {
            parse_log_level(level).ok_or(format!("unsupported --log-level: {level}"))?
        }
        None => FfmpegLogLevel::Quiet,
    };
    filmstripe::set_ffmpeg_log_level(ffmpeg_level);

    if cli.probe {
        return print_metadata(&cli);
    }

    if cli.numframes == 0 {
        return Err("--numframes must be greater than 0".into());
    }
    if cli.workers == 0 {
        return Err("--workers must be greater than 0".into());
    }

    let strategy = parse_strategy(&cli.strategy)
        .ok_or(format!("unsupported --strategy: {}", cli.strategy))?;

    ensure_writable_path(&cli.out, cli.overwrite)?;

    let mut options = BarcodeOptions::new()
        .with_samples(cli.numframes)
        .with_strategy(strategy)
        .with_workers(cli.workers)
        .with_height(cli.height);

    let progress_bar = if cli.progress {
        let bar = ProgressBar::new(cli.numframes as u64);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        options = options.with_progress(Arc::new(BarProgress { bar: bar.clone() }));
        Some(bar)
    } else {
        None
    };

    if cli.verbose {
        eprintln!(
            "rendering {} samples from {} with {} workers",
            cli.numframes,
            cli.filename.display(),
            cli.workers,
        );
    }

    filmstripe::render_to_file(&cli.filename, &cli.out, &options)?;

    if let Some(bar) = progress_bar {
        bar.finish_with_message("done");
    }

    println!(
        "{} {}",
        "success:".green().bold(),
        format!("Wrote barcode to {}", cli.out.display()).green()
    );

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_log_level, parse_strategy};
    use filmstripe::SampleStrategy;

    #[test]
    fn parse_strategy_aliases() {
        assert_eq!(parse_strategy("time"), Some(SampleStrategy::TimeOffset));
        assert_eq!(
            parse_strategy("time-offset"),
            Some(SampleStrategy::TimeOffset)
        );
        assert_eq!(parse_strategy("FRAME"), Some(SampleStrategy::FrameIndex));
        assert_eq!(
            parse_strategy("frame-index"),
            Some(SampleStrategy::FrameIndex)
        );
        assert_eq!(parse_strategy("keyframes"), None);
    }

    #[test]
    fn parse_log_level_aliases() {
        assert!(parse_log_level("quiet").is_some());
        assert!(parse_log_level("WARN").is_some());
        assert!(parse_log_level("trace").is_some());
        assert!(parse_log_level("loud").is_none());
    }
}
