//! Bit-reversal permutation for the iterative transform.
//!
//! The table depends only on the transform size, so it is built once at
//! startup and then shared read-only by every transform of that size.

use std::ops::Index;

use crate::error::{try_filled, FftError, Result};

/// `floor(log2(n))`, counted by shifting `n` right until it reaches zero.
///
/// Returns `-1` for `n == 0`. The transform never accepts a size of zero.
pub fn log2_floor(n: usize) -> i32 {
    let mut n = n;
    let mut shifts = 0;
    while n != 0 {
        n >>= 1;
        shifts += 1;
    }
    shifts - 1
}

/// Checks that `size` is a usable transform size and returns its bit width.
pub(crate) fn checked_bits(size: usize) -> Result<u32> {
    if size == 0 || !size.is_power_of_two() {
        return Err(FftError::InvalidSize { size });
    }
    Ok(log2_floor(size) as u32)
}

/// Reverses the low `bits` bits of `n`.
#[inline]
pub(crate) fn reverse_bits(n: usize, bits: u32) -> usize {
    let mut n = n;
    let mut reversed = 0;
    for _ in 0..bits {
        reversed = (reversed << 1) | (n & 1);
        n >>= 1;
    }
    reversed
}

/// Reverses the low `log2(size)` bits of `n`.
///
/// `size` must be a non-zero power of two. Any other size is rejected with
/// [`FftError::InvalidSize`] instead of silently using the next lower power
/// of two, which would yield an inconsistent permutation.
pub fn bit_reverse(size: usize, n: usize) -> Result<usize> {
    let bits = checked_bits(size)?;
    Ok(reverse_bits(n, bits))
}

/// An immutable bit-reversal permutation of `[0, len)`.
///
/// Slot `k` holds `bit_reverse(len, k)`. The permutation is its own inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitReversalTable {
    indices: Box<[usize]>,
}

impl BitReversalTable {
    /// Builds the table for transform size `n`.
    pub fn new(n: usize) -> Result<Self> {
        let bits = checked_bits(n)?;
        let mut indices = try_filled(n, 0usize)?;
        for (k, slot) in indices.iter_mut().enumerate() {
            *slot = reverse_bits(k, bits);
        }
        log::debug!("built bit-reversal table for size {n} ({bits} bits)");
        Ok(Self {
            indices: indices.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

impl Index<usize> for BitReversalTable {
    type Output = usize;

    fn index(&self, k: usize) -> &usize {
        &self.indices[k]
    }
}

/// Builds the bit-reversal table for transform size `n`.
pub fn precompute_table(n: usize) -> Result<BitReversalTable> {
    BitReversalTable::new(n)
}
