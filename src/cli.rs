//! Command-line arguments and the validated analyzer configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::error::FftError;

pub const DEFAULT_FFT_SIZE: usize = 1 << 10;
pub const DEFAULT_FPS: u32 = 60;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Terminal spectrum analyzer for WAV files", long_about = None)]
pub struct Args {
    /// Path to the audio file (WAV format)
    pub file: PathBuf,

    /// Transform size, must be a power of two
    #[arg(short = 'n', long, default_value_t = DEFAULT_FFT_SIZE)]
    pub fft_size: usize,

    /// Target frames per second
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Canvas width used for bar geometry
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// Canvas height used for bar geometry
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,

    /// Number of text columns
    #[arg(long, default_value_t = 64)]
    pub columns: usize,

    /// Number of text rows
    #[arg(long, default_value_t = 16)]
    pub rows: usize,

    /// Stop after this many frames instead of after one pass over the file
    #[arg(long)]
    pub frames: Option<usize>,

    /// Start position as a fraction of the file (0.0 - 1.0)
    #[arg(long, default_value_t = 0.0)]
    pub seek: f64,

    /// Process frames as fast as possible instead of at the target rate
    #[arg(long)]
    pub no_realtime: bool,
}

/// Settings for one analyzer run, checked up front.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    pub file: PathBuf,
    pub fft_size: usize,
    pub fps: u32,
    pub width: f32,
    pub height: f32,
    pub columns: usize,
    pub rows: usize,
    pub frames: Option<usize>,
    pub seek: f64,
    pub realtime: bool,
}

impl TryFrom<Args> for AnalyzerConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> anyhow::Result<Self> {
        if args.fft_size == 0 || !args.fft_size.is_power_of_two() {
            return Err(FftError::InvalidSize {
                size: args.fft_size,
            }
            .into());
        }
        anyhow::ensure!(args.fps > 0, "frame rate must be positive");
        anyhow::ensure!(
            args.width > 0.0 && args.height > 0.0,
            "canvas size must be positive, got {}x{}",
            args.width,
            args.height
        );

        Ok(Self {
            file: args.file,
            fft_size: args.fft_size,
            fps: args.fps,
            width: args.width,
            height: args.height,
            columns: args.columns.max(1),
            rows: args.rows.max(1),
            frames: args.frames,
            seek: args.seek.clamp(0.0, 1.0),
            realtime: !args.no_realtime,
        })
    }
}
