use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::path::Path;

use crate::complex::Complex;

/// Header details of a loaded WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct WavInfo {
    pub file_size: u64,
    pub sample_format: hound::SampleFormat,
    pub channels: u16,
    pub sample_rate: u32,
    pub bytes_per_sec: u32,
    pub block_align: u32,
    pub bits_per_sample: u16,
    pub data_size: u64,
}

impl WavInfo {
    fn from_spec(spec: &hound::WavSpec, file_size: u64, total_samples: u64) -> Self {
        let bytes_per_sample = (u32::from(spec.bits_per_sample) + 7) / 8;
        let block_align = bytes_per_sample * u32::from(spec.channels);
        Self {
            file_size,
            sample_format: spec.sample_format,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bytes_per_sec: block_align * spec.sample_rate,
            block_align,
            bits_per_sample: spec.bits_per_sample,
            data_size: total_samples * u64::from(bytes_per_sample),
        }
    }

    pub fn log(&self) {
        info!(
            "[WAV FILE] size: {} B, format: {:?}, channels: {}, sample rate: {} Hz, \
             bytes/sec: {}, block align: {}, bits/sample: {}, data size: {} B",
            self.file_size,
            self.sample_format,
            self.channels,
            self.sample_rate,
            self.bytes_per_sec,
            self.block_align,
            self.bits_per_sample,
            self.data_size,
        );
    }
}

/// A decoded, mono-mixed WAV file with a looping playback cursor.
///
/// The cursor is measured in frames (one sample per channel). Advancing past
/// the end wraps back to the start, so playback loops.
pub struct WavSource {
    info: WavInfo,
    samples: Vec<f32>,
    cursor: usize,
}

impl WavSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = hound::WavReader::open(path)
            .with_context(|| format!("failed to open WAV file {}", path.display()))?;
        let file_size = std::fs::metadata(path)
            .with_context(|| format!("failed to stat {}", path.display()))?
            .len();

        let spec = reader.spec();
        let info = WavInfo::from_spec(&spec, file_size, u64::from(reader.len()));
        if spec.channels == 0 {
            bail!("{} has no channels", path.display());
        }

        let interleaved = read_normalized(reader)
            .with_context(|| format!("failed to decode samples of {}", path.display()))?;
        let samples = mix_to_mono(&interleaved, usize::from(spec.channels));
        if samples.is_empty() {
            bail!("{} contains no audio data", path.display());
        }

        debug!("decoded {} frames from {}", samples.len(), path.display());
        Ok(Self {
            info,
            samples,
            cursor: 0,
        })
    }

    /// Wraps already decoded mono samples.
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if samples.is_empty() {
            bail!("sample source must not be empty");
        }
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let info = WavInfo::from_spec(&spec, 0, samples.len() as u64);
        Ok(Self {
            info,
            samples,
            cursor: 0,
        })
    }

    pub fn info(&self) -> &WavInfo {
        &self.info
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Fraction of the file already played, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        self.cursor as f64 / self.samples.len() as f64
    }

    /// Frames played per rendered frame at the given frame rate.
    pub fn frames_per_tick(&self, fps: u32) -> usize {
        (self.info.sample_rate / fps.max(1)).max(1) as usize
    }

    /// Moves the cursor forward, wrapping at the end. Returns true when it
    /// wrapped.
    pub fn advance(&mut self, frames: usize) -> bool {
        let next = self.cursor + frames;
        self.cursor = next % self.samples.len();
        next >= self.samples.len()
    }

    /// Jumps to `ratio` of the file, aligned down to a whole second.
    pub fn seek(&mut self, ratio: f64) {
        let ratio = ratio.clamp(0.0, 1.0);
        let mut pos = (self.samples.len() as f64 * ratio) as usize;
        let second = self.info.sample_rate as usize;
        if second > 0 {
            pos -= pos % second;
        }
        self.cursor = pos % self.samples.len();
        debug!("seek to frame {} ({:.1}%)", self.cursor, ratio * 100.0);
    }

    /// Fills `out` with the samples at the cursor as real-valued complex
    /// numbers, wrapping around the end of the file.
    pub fn fill_window(&self, out: &mut [Complex]) {
        let len = self.samples.len();
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = Complex::from_re(f64::from(self.samples[(self.cursor + i) % len]));
        }
    }
}

fn read_normalized<R: std::io::Read>(mut reader: hound::WavReader<R>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Averages the first two channels of every frame. Mono input is used as is.
fn mix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    interleaved
        .chunks_exact(channels)
        .map(|frame| {
            let left = frame[0];
            let right = if channels >= 2 { frame[1] } else { left };
            (left + right) * 0.5
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixdown_averages_left_and_right() {
        let stereo = [1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        assert_eq!(mix_to_mono(&stereo, 2), vec![0.5, 0.5, 0.0]);
        assert_eq!(mix_to_mono(&[0.25, -0.75], 1), vec![0.25, -0.75]);
        // Extra channels are ignored.
        assert_eq!(mix_to_mono(&[1.0, 1.0, 9.0], 3), vec![1.0]);
    }

    #[test]
    fn advance_wraps_to_start() {
        let mut source = WavSource::from_samples(vec![0.0; 10], 4).unwrap();
        assert!(!source.advance(6));
        assert_eq!(source.cursor(), 6);
        assert!(source.advance(6));
        assert_eq!(source.cursor(), 2);
    }

    #[test]
    fn seek_aligns_to_whole_seconds() {
        let mut source = WavSource::from_samples(vec![0.0; 100], 10).unwrap();
        source.seek(0.47);
        assert_eq!(source.cursor(), 40);
        source.seek(2.0);
        assert_eq!(source.cursor(), 0);
        source.seek(-1.0);
        assert_eq!(source.cursor(), 0);
        assert_eq!(source.progress(), 0.0);
    }

    #[test]
    fn window_wraps_around_end() {
        let mut source = WavSource::from_samples(vec![1.0, 2.0, 3.0], 48_000).unwrap();
        source.advance(2);
        let mut window = [Complex::ZERO; 4];
        source.fill_window(&mut window);
        let reals: Vec<f64> = window.iter().map(|c| c.re).collect();
        assert_eq!(reals, vec![3.0, 1.0, 2.0, 3.0]);
        assert!(window.iter().all(|c| c.im == 0.0));
    }

    #[test]
    fn frames_per_tick_never_zero() {
        let source = WavSource::from_samples(vec![0.0], 44_100).unwrap();
        assert_eq!(source.frames_per_tick(60), 735);
        assert_eq!(source.frames_per_tick(0), 44_100);
        let slow = WavSource::from_samples(vec![0.0], 30).unwrap();
        assert_eq!(slow.frames_per_tick(60), 1);
    }

    #[test]
    fn data_size_counts_every_sample() {
        let info = WavInfo::from_spec(
            &hound::WavSpec {
                channels: 2,
                sample_rate: 48_000,
                bits_per_sample: 24,
                sample_format: hound::SampleFormat::Int,
            },
            0,
            1 << 33,
        );
        assert_eq!(info.data_size, 3 << 33);
        assert_eq!(info.block_align, 6);

        let source = WavSource::from_samples(vec![0.0; 5], 8_000).unwrap();
        assert_eq!(source.info().data_size, 20);
    }

    #[test]
    fn empty_source_is_rejected() {
        assert!(WavSource::from_samples(Vec::new(), 44_100).is_err());
    }
}
