use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use rusty_spectrum::audio::WavSource;
use rusty_spectrum::processing::Processor;
use rusty_spectrum::rendering::{bar_layout, spectrum_height, TerminalRenderer};

fn temp_wav(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rusty-spectrum-{}-{}.wav", std::process::id(), name))
}

fn write_stereo_tone(path: &Path, sample_rate: u32, frames: usize, bin: usize, n: usize) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let v = (2.0 * PI * bin as f32 * i as f32 / n as f32).sin();
        let s = (v * 0.5 * i16::MAX as f32) as i16;
        // Right channel is silent, so the mono mix is half the left channel.
        writer.write_sample(s).unwrap();
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn loads_stereo_pcm_and_reports_header() {
    let path = temp_wav("header");
    write_stereo_tone(&path, 8_000, 4_000, 4, 64);

    let source = WavSource::open(&path).unwrap();
    let info = source.info();
    assert_eq!(info.channels, 2);
    assert_eq!(info.sample_rate, 8_000);
    assert_eq!(info.bits_per_sample, 16);
    assert_eq!(info.block_align, 4);
    assert_eq!(info.bytes_per_sec, 32_000);
    assert_eq!(info.data_size, 16_000);
    assert_eq!(source.len(), 4_000);
    assert!(source.samples().iter().all(|s| s.abs() <= 0.25 + 1e-4));

    std::fs::remove_file(&path).ok();
}

#[test]
fn tone_peaks_in_expected_bin() {
    let path = temp_wav("tone");
    let n = 64;
    write_stereo_tone(&path, 8_000, 1_024, 4, n);

    let mut source = WavSource::open(&path).unwrap();
    let mut processor = Processor::new(n).unwrap();

    for _ in 0..3 {
        let frame = processor.process_source(&source).unwrap();
        let peak = frame.magnitudes[..n / 2]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 4);
        source.advance(n);
    }

    std::fs::remove_file(&path).ok();
}

#[test]
fn frame_pipeline_renders_text() {
    let path = temp_wav("render");
    write_stereo_tone(&path, 8_000, 512, 2, 32);

    let source = WavSource::open(&path).unwrap();
    let mut processor = Processor::new(32).unwrap();
    let frame = processor.process_source(&source).unwrap();
    let bars = bar_layout(frame.magnitudes, frame.max, 320.0, 180.0);
    assert_eq!(bars.len(), 16);

    let renderer = TerminalRenderer::new(16, 4);
    let mut out = Vec::new();
    renderer
        .render(&mut out, &bars, spectrum_height(180.0), source.progress())
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    // The tallest column is the tone's bin.
    assert_eq!(lines[0].chars().position(|c| c == '█'), Some(2));
    assert_eq!(lines[4], "-".repeat(16));

    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_file_is_an_error() {
    let err = WavSource::open(temp_wav("does-not-exist")).err().unwrap();
    assert!(err.to_string().contains("failed to open WAV file"));
}
