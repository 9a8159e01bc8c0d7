//! Error types for texload-common.

use std::io;

use thiserror::Error;

/// Common error type for stream level failures.
#[derive(Debug, Error)]
pub enum Error {
    /// The stream ended before the requested number of bytes could be read.
    #[error("unexpected end of stream at offset {offset}: needed {needed} bytes")]
    TruncatedStream { needed: usize, offset: u64 },

    /// A buffer of `size` bytes could not be reserved.
    #[error("failed to allocate {size} bytes")]
    AllocationFailed { size: usize },

    /// An output size does not fit in `usize`.
    #[error("{0} size overflows the address space")]
    SizeOverflow(&'static str),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Map an I/O failure from a read of `needed` bytes starting at `offset`.
    ///
    /// `UnexpectedEof` becomes [`Error::TruncatedStream`], anything else stays an I/O error.
    pub fn from_read(err: io::Error, needed: usize, offset: u64) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::TruncatedStream { needed, offset }
        } else {
            Error::Io(err)
        }
    }

    /// Check if this error means the input ran out of bytes.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::TruncatedStream { .. })
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
