use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by the transform and the bit-reversal table builder.
///
/// Division by the zero complex number is not represented here: it is a
/// caller precondition and shows up as NaN or infinite components instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FftError {
    /// The transform size is zero or not a power of two.
    #[error("invalid transform size {size}: must be a non-zero power of two")]
    InvalidSize { size: usize },

    /// A supplied table or buffer does not match the transform size.
    #[error("invalid {what} length {actual}: transform size is {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Storage for a table or an engine-owned spectrum could not be reserved.
    #[error("failed to allocate {len} elements")]
    AllocationFailure {
        len: usize,
        #[source]
        source: TryReserveError,
    },
}

impl FftError {
    /// True for every variant caused by a bad size or length argument.
    pub fn is_invalid_size(&self) -> bool {
        matches!(self, Self::InvalidSize { .. } | Self::LengthMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, FftError>;

/// Allocates a vector of `len` copies of `value`, reporting allocation
/// failure instead of aborting.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|source| FftError::AllocationFailure { len, source })?;
    v.resize(len, value);
    Ok(v)
}
