use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::io;
use std::thread;
use std::time::{Duration, Instant};

use rusty_spectrum::audio::WavSource;
use rusty_spectrum::cli::{AnalyzerConfig, Args};
use rusty_spectrum::processing::Processor;
use rusty_spectrum::rendering::{bar_layout, spectrum_height, TerminalRenderer};

fn main() -> Result<()> {
    // initialize the logger
    env_logger::init();

    // parse and validate command-line arguments
    let config = AnalyzerConfig::try_from(Args::parse())?;

    // load the audio file
    let mut source = WavSource::open(&config.file)?;
    source.info().log();
    source.seek(config.seek);

    // the bit-reversal table is built here, once
    let mut processor = Processor::new(config.fft_size)?;

    let renderer = TerminalRenderer::new(config.columns, config.rows)
        .with_clear_screen(config.realtime);

    let step = source.frames_per_tick(config.fps);
    let total = config
        .frames
        .unwrap_or_else(|| (source.len() - source.cursor() + step - 1) / step);
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(config.fps));
    let area = spectrum_height(config.height);

    info!(
        "Starting spectrum analysis: {} frames, fft size {}, {} samples per frame",
        total, config.fft_size, step
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for tick in 0..total {
        let started = Instant::now();

        // compute the spectrum of the current window
        let frame = processor.process_source(&source)?;
        let bars = bar_layout(frame.magnitudes, frame.max, config.width, config.height);

        // render visualization
        renderer.render(&mut out, &bars, area, source.progress())?;

        if source.advance(step) {
            debug!("playback looped at frame {}", tick);
        }

        if config.realtime {
            if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    info!("Finished after {} frames", total);
    Ok(())
}
