//! Error types for PFM decoding.

use thiserror::Error;

/// Errors that can occur when decoding portable float maps.
#[derive(Debug, Error)]
pub enum Error {
    /// Stream level error (truncation or I/O).
    #[error("{0}")]
    Common(#[from] texload_common::Error),

    /// First line is neither `PF` nor `Pf`.
    #[error("PFM header must begin with PF or Pf, found {0:?}")]
    BadSignature(String),

    /// Dimension line is not `W H` or a dimension is not positive.
    #[error("invalid PFM dimensions: {0:?}")]
    InvalidDimensions(String),

    /// A header value failed to parse as a number.
    #[error("malformed {key} value in PFM header: {value:?}")]
    MalformedHeaderValue { key: &'static str, value: String },

    /// A dimension exceeds the configured limit.
    #[error("too large {dimension}: {found} exceeds {limit}")]
    TooLargeDimensions {
        dimension: &'static str,
        limit: usize,
        found: usize,
    },
}

impl Error {
    /// Check if this error means the input ran out of bytes.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Common(e) if e.is_truncated())
    }
}

/// Result type for PFM operations.
pub type Result<T> = std::result::Result<T, Error>;
