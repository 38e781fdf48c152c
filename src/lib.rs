//! Real-time spectrum analysis.
//!
//! The numerical core is a small complex arithmetic module and an iterative
//! radix-2 FFT driven by a precomputed bit-reversal table. Around it sit a
//! WAV sample source, a per-frame processor that turns sample windows into
//! magnitude spectra, and the bar geometry used to draw them.
//!
//! ```
//! use rusty_spectrum::{precompute_table, transform, Complex, Spectrum};
//!
//! let table = precompute_table(4).unwrap();
//! let input = [1.0, 0.0, -1.0, 0.0].map(Complex::from_re);
//! let mut output = [Complex::ZERO; 4];
//!
//! let result = transform(&input, 4, Some(&table), Some(&mut output)).unwrap();
//! assert_eq!(result, Spectrum::Written);
//! assert!((output[1].modulus() - 2.0).abs() < 1e-12);
//! ```

pub mod audio;
pub mod bitrev;
pub mod cli;
pub mod complex;
pub mod error;
pub mod fft;
pub mod processing;
pub mod rendering;

pub use bitrev::{bit_reverse, log2_floor, precompute_table, BitReversalTable};
pub use complex::Complex;
pub use error::FftError;
pub use fft::{fft, fft_into, magnitude, magnitudes_into, transform, Spectrum};
