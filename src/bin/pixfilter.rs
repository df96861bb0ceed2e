use clap::{Parser, Subcommand};
use pixel_filter::tools::{ToolError, binary_stats, load_rgb, luma_stats, save_rgb};
use pixel_filter::{PixelBuffer, Threshold, adaptive_binarize, binarize, grayscale, sharpen};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "pixfilter", version, about = "Pixel filter CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an image to BT.601 grayscale
    Grayscale {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Binarize against a fractional strength or an explicit level
    Binarize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Strength in [0, 1], mapped to round(strength * 255)
        #[arg(long, conflicts_with = "level")]
        strength: Option<f64>,
        /// Intensity level in [0, 255]
        #[arg(long)]
        level: Option<u8>,
    },
    /// Binarize with Otsu's adaptive threshold
    Otsu {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Sharpen with the 5x5 wraparound kernel
    Sharpen {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 0.85)]
        strength: f64,
    },
    /// Print luma and threshold statistics for an image
    Stats {
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Grayscale { input, output } => run_filter(&input, &output, |b| Ok(grayscale(b)?)),
        Command::Binarize {
            input,
            output,
            strength,
            level,
        } => {
            let threshold = match (strength, level) {
                (Some(s), _) => Threshold::Strength(s),
                (None, Some(l)) => Threshold::Level(l),
                (None, None) => Threshold::Strength(0.5),
            };
            run_filter(&input, &output, |b| Ok(binarize(b, threshold)?))
        }
        Command::Otsu { input, output } => {
            run_filter(&input, &output, |b| Ok(adaptive_binarize(b)?))
        }
        Command::Sharpen {
            input,
            output,
            strength,
        } => run_filter(&input, &output, |b| Ok(sharpen(b, strength)?)),
        Command::Stats { input } => stats_cmd(&input),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pixfilter: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_filter<F>(input: &Path, output: &Path, filter: F) -> Result<(), ToolError>
where
    F: FnOnce(&PixelBuffer) -> Result<PixelBuffer, ToolError>,
{
    let buffer = load_rgb(input)?;
    let start = Instant::now();
    let result = filter(&buffer)?;
    let elapsed = start.elapsed();
    save_rgb(&result, output)?;
    println!(
        "{} ({}x{}) -> {} in {:.2}ms",
        input.display(),
        buffer.width(),
        buffer.height(),
        output.display(),
        elapsed.as_secs_f64() * 1000.0
    );
    Ok(())
}

fn stats_cmd(input: &Path) -> Result<(), ToolError> {
    let buffer = load_rgb(input)?;
    println!("Image: {} ({}x{})", input.display(), buffer.width(), buffer.height());

    let luma = luma_stats(&buffer);
    println!("Luma range: {}-{}, average: {}", luma.min, luma.max, luma.avg);

    let level = pixel_filter::otsu_threshold(&buffer)?;
    println!("Otsu threshold: {}", level);

    let binary = adaptive_binarize(&buffer)?;
    let stats = binary_stats(&binary);
    println!(
        "Binary: black_pixels={} total={} black_ratio={:.2}%",
        stats.black_pixels,
        stats.total_pixels,
        stats.black_ratio * 100.0
    );
    Ok(())
}
