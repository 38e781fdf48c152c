//! Iterative radix-2 decimation-in-time FFT.
//!
//! The transform is stateless: the size, the optional bit-reversal table and
//! the optional output buffer are all passed in on every call, so repeated
//! calls with the same arguments produce bit-identical spectra.

use std::f64::consts::PI;

use crate::bitrev::{checked_bits, reverse_bits, BitReversalTable};
use crate::complex::Complex;
use crate::error::{try_filled, FftError, Result};

/// Where the result of [`transform`] ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Spectrum {
    /// The engine allocated the spectrum and hands it to the caller.
    Owned(Vec<Complex>),
    /// The spectrum was written into the caller's output buffer.
    Written,
}

impl Spectrum {
    /// Returns the owned spectrum, if the engine allocated one.
    pub fn into_owned(self) -> Option<Vec<Complex>> {
        match self {
            Spectrum::Owned(values) => Some(values),
            Spectrum::Written => None,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Spectrum::Written)
    }
}

/// Computes the discrete Fourier transform of `input`.
///
/// `n` must be a non-zero power of two equal to `input.len()`. When `table`
/// is given its length must be `n`; without it the reversal is computed on
/// the fly with the same result. When `output` is given it must hold `n`
/// values, receives the spectrum, and [`Spectrum::Written`] is returned.
/// Otherwise a new vector is allocated and returned as [`Spectrum::Owned`].
///
/// Every size is checked before any work is done.
pub fn transform(
    input: &[Complex],
    n: usize,
    table: Option<&BitReversalTable>,
    output: Option<&mut [Complex]>,
) -> Result<Spectrum> {
    let bits = validate(input, n, table)?;
    match output {
        Some(out) => {
            check_len("output buffer", n, out.len())?;
            run(input, bits, table, out);
            Ok(Spectrum::Written)
        }
        None => run_owned(input, bits, table).map(Spectrum::Owned),
    }
}

/// Transforms `input` into a newly allocated spectrum of the same length.
pub fn fft(input: &[Complex], table: Option<&BitReversalTable>) -> Result<Vec<Complex>> {
    let bits = validate(input, input.len(), table)?;
    run_owned(input, bits, table)
}

/// Transforms `input` into `output` using a precomputed table.
pub fn fft_into(
    input: &[Complex],
    table: &BitReversalTable,
    output: &mut [Complex],
) -> Result<()> {
    transform(input, table.len(), Some(table), Some(output)).map(|_| ())
}

/// The modulus of one spectrum value.
pub fn magnitude(value: Complex) -> f64 {
    value.modulus()
}

/// Writes the modulus of each spectrum value into `out` and returns the
/// largest one (0 for an empty spectrum).
pub fn magnitudes_into(spectrum: &[Complex], out: &mut [f64]) -> Result<f64> {
    check_len("magnitude buffer", spectrum.len(), out.len())?;
    let mut max = 0.0f64;
    for (slot, value) in out.iter_mut().zip(spectrum) {
        let m = magnitude(*value);
        max = max.max(m);
        *slot = m;
    }
    Ok(max)
}

fn validate(input: &[Complex], n: usize, table: Option<&BitReversalTable>) -> Result<u32> {
    let bits = checked_bits(n)?;
    check_len("input", n, input.len())?;
    if let Some(table) = table {
        check_len("bit-reversal table", n, table.len())?;
    }
    Ok(bits)
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(FftError::LengthMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

fn run_owned(
    input: &[Complex],
    bits: u32,
    table: Option<&BitReversalTable>,
) -> Result<Vec<Complex>> {
    let mut out = try_filled(input.len(), Complex::ZERO)?;
    run(input, bits, table, &mut out);
    Ok(out)
}

fn run(input: &[Complex], bits: u32, table: Option<&BitReversalTable>, out: &mut [Complex]) {
    match table {
        Some(table) => {
            for (k, &value) in input.iter().enumerate() {
                out[table[k]] = value;
            }
        }
        None => {
            for (k, &value) in input.iter().enumerate() {
                out[reverse_bits(k, bits)] = value;
            }
        }
    }
    butterflies(out, bits);
    log::trace!("transformed {} samples", out.len());
}

/// Combines the bit-reversed sequence in place, one stage per bit.
fn butterflies(out: &mut [Complex], bits: u32) {
    let n = out.len();
    for s in 1..=bits {
        let m = 1usize << s;
        let half = m / 2;
        let w_m = Complex::from_im(-2.0 * PI / m as f64).exp();

        for k in (0..n).step_by(m) {
            let mut w = Complex::ONE;
            for j in 0..half {
                let t = w * out[k + j + half];
                let u = out[k + j];
                out[k + j] = u + t;
                out[k + j + half] = u - t;
                w = w * w_m;
            }
        }
    }
}
