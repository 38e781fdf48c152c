use std::sync::Arc;

use crate::audio::WavSource;
use crate::bitrev::{precompute_table, BitReversalTable};
use crate::complex::Complex;
use crate::error::{try_filled, Result};
use crate::fft::{fft_into, magnitudes_into};

/// Magnitudes of the most recent frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub magnitudes: &'a [f64],
    /// Largest value in `magnitudes`.
    pub max: f64,
}

/// Turns one window of samples per frame into a magnitude spectrum.
///
/// The bit-reversal table and all buffers are created once in [`Processor::new`]
/// and reused for every frame.
pub struct Processor {
    table: Arc<BitReversalTable>,
    input: Vec<Complex>,
    output: Vec<Complex>,
    magnitudes: Vec<f64>,
    max: f64,
}

impl Processor {
    pub fn new(size: usize) -> Result<Self> {
        let table = Arc::new(precompute_table(size)?);
        Self::with_table(table)
    }

    /// Builds a processor around an existing table, so processors of the same
    /// size can share one.
    pub fn with_table(table: Arc<BitReversalTable>) -> Result<Self> {
        let size = table.len();
        Ok(Self {
            input: try_filled(size, Complex::ZERO)?,
            output: try_filled(size, Complex::ZERO)?,
            magnitudes: try_filled(size, 0.0)?,
            max: 0.0,
            table,
        })
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn table(&self) -> &Arc<BitReversalTable> {
        &self.table
    }

    /// Largest magnitude of the last processed frame.
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// The complex spectrum of the last processed frame.
    pub fn spectrum(&self) -> &[Complex] {
        &self.output
    }

    /// Processes real samples. Short input is zero-padded, long input is
    /// truncated to the transform size.
    pub fn process(&mut self, samples: &[f32]) -> Result<Frame<'_>> {
        let mut samples = samples.iter();
        for slot in self.input.iter_mut() {
            let sample = samples.next().copied().unwrap_or(0.0);
            *slot = Complex::from_re(f64::from(sample));
        }
        self.run()
    }

    /// Processes the window starting at the source's cursor.
    pub fn process_source(&mut self, source: &WavSource) -> Result<Frame<'_>> {
        source.fill_window(&mut self.input);
        self.run()
    }

    /// Zeroes the buffers and the frame maximum.
    pub fn reset(&mut self) {
        self.input.fill(Complex::ZERO);
        self.output.fill(Complex::ZERO);
        self.magnitudes.fill(0.0);
        self.max = 0.0;
    }

    fn run(&mut self) -> Result<Frame<'_>> {
        fft_into(&self.input, &self.table, &mut self.output)?;
        self.max = magnitudes_into(&self.output, &mut self.magnitudes)?;
        Ok(Frame {
            magnitudes: &self.magnitudes,
            max: self.max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_signal_is_all_dc() {
        let mut processor = Processor::new(16).unwrap();
        let frame = processor.process(&[0.5; 16]).unwrap();
        assert!((frame.magnitudes[0] - 8.0).abs() < 1e-9);
        assert!(frame.magnitudes[1..].iter().all(|m| m.abs() < 1e-9));
        assert!((frame.max - 8.0).abs() < 1e-9);
    }

    #[test]
    fn short_input_is_zero_padded() {
        let mut processor = Processor::new(8).unwrap();
        let frame = processor.process(&[1.0]).unwrap();
        // A single impulse has a flat spectrum.
        assert!(frame.magnitudes.iter().all(|m| (m - 1.0).abs() < 1e-12));
    }

    #[test]
    fn long_input_is_truncated() {
        let mut processor = Processor::new(4).unwrap();
        let frame = processor.process(&[1.0, 1.0, 1.0, 1.0, 100.0]).unwrap();
        assert!((frame.magnitudes[0] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn reset_clears_state() {
        let mut processor = Processor::new(4).unwrap();
        processor.process(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((processor.max() - 10.0).abs() < 1e-12);
        processor.reset();
        assert_eq!(processor.max(), 0.0);
        assert!(processor.magnitudes().iter().all(|m| *m == 0.0));
        assert!(processor.spectrum().iter().all(|c| *c == Complex::ZERO));
        let frame = processor.process(&[]).unwrap();
        assert_eq!(frame.max, 0.0);
    }

    #[test]
    fn processors_share_one_table() {
        let first = Processor::new(32).unwrap();
        let second = Processor::with_table(Arc::clone(first.table())).unwrap();
        assert!(Arc::ptr_eq(first.table(), second.table()));
        assert_eq!(second.size(), 32);
    }

    #[test]
    fn rejects_bad_size() {
        assert!(Processor::new(100).is_err());
        assert!(Processor::new(0).is_err());
    }

    #[test]
    fn source_window_matches_plain_samples() {
        let samples: Vec<f32> = (0..64).map(|i| (i as f32 * 0.3).sin()).collect();
        let mut source = WavSource::from_samples(samples.clone(), 8_000).unwrap();
        source.advance(8);

        let mut from_source = Processor::new(16).unwrap();
        let expected: Vec<f64> = from_source
            .process_source(&source)
            .unwrap()
            .magnitudes
            .to_vec();

        let mut from_slice = Processor::new(16).unwrap();
        let frame = from_slice.process(&samples[8..24]).unwrap();
        assert_eq!(frame.magnitudes, expected.as_slice());
    }
}
