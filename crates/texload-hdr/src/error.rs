//! Error types for Radiance HDR decoding.

use thiserror::Error;

/// Errors that can occur when decoding Radiance files.
#[derive(Debug, Error)]
pub enum Error {
    /// Stream level error (truncation or I/O).
    #[error("{0}")]
    Common(#[from] texload_common::Error),

    /// `FORMAT=` names something other than RLE RGBE or XYZE.
    #[error("unsupported format in HDR picture: {0}")]
    UnsupportedFormat(String),

    /// Stream ended before the resolution line.
    #[error("missing resolution string in HDR file")]
    MissingResolution,

    /// Resolution line does not have four tokens.
    #[error("invalid resolution string in HDR file: {0:?}")]
    MalformedResolution(String),

    /// A header value failed to parse as a number.
    #[error("malformed {key} value in HDR header: {value:?}")]
    MalformedHeaderValue { key: &'static str, value: String },

    /// Width or height is zero.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A dimension exceeds the configured limit.
    #[error("too large {dimension}: {found} exceeds {limit}")]
    TooLargeDimensions {
        dimension: &'static str,
        limit: usize,
        found: usize,
    },

    /// RLE scanline header declares a different width.
    #[error("illegal scanline width in HDR file: {expected} != {found}")]
    ScanlineWidthMismatch { expected: usize, found: usize },

    /// A run would write past the end of the scanline, or makes no progress.
    #[error("invalid run length {code} at texel {position} of {width}")]
    InvalidRunLength {
        code: u8,
        position: usize,
        width: usize,
    },
}

impl Error {
    /// Check if this error means the input ran out of bytes.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Common(e) if e.is_truncated())
    }
}

/// Result type for Radiance operations.
pub type Result<T> = std::result::Result<T, Error>;
