//! Fallible allocation of output buffers.

use crate::{Error, Result};

/// Multiply the factors of an output size, failing on overflow.
///
/// `what` names the buffer in the error.
pub fn checked_size(what: &'static str, factors: &[usize]) -> Result<usize> {
    factors
        .iter()
        .try_fold(1usize, |acc, &factor| acc.checked_mul(factor))
        .ok_or(Error::SizeOverflow(what))
}

/// Allocate a zero-filled buffer of `size` bytes.
///
/// Returns [`Error::AllocationFailed`] instead of aborting when the
/// allocator refuses the request.
pub fn zeroed_buffer(size: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| Error::AllocationFailed { size })?;
    buf.resize(size, 0);
    Ok(buf)
}
