//! Error types for DDS handling.

use texload_common::PixelFormat;
use thiserror::Error;

use crate::header::FourCC;

/// Errors that can occur when decoding DDS files.
#[derive(Debug, Error)]
pub enum Error {
    /// Stream level error (truncation or I/O).
    #[error("{0}")]
    Common(#[from] texload_common::Error),

    /// Magic or header size field is wrong.
    #[error("not a DDS file: magic {magic:#010x}, header size {header_size}")]
    BadMagic { magic: u32, header_size: u32 },

    /// Neither set of mandatory header flags is present.
    #[error("mandatory flags missing: {0:#x}")]
    MissingMandatoryFlags(u32),

    /// Pixel format structure has the wrong size.
    #[error("pixel format size is {0}, not 32")]
    BadPixelFormatSize(u32),

    /// Compressed format code is not recognized.
    #[error("unknown fourcc: {0}")]
    UnknownFourCC(FourCC),

    /// Extension header names a DXGI format other than BC5 UNORM.
    #[error("only DXGI_FORMAT_BC5_UNORM is supported for DX10 DDS, got {0}")]
    UnsupportedExtensionFormat(u32),

    /// Extension header flags a cubemap without six array slices.
    #[error("cubemaps should consist of 6 images, got {0}")]
    InvalidCubemapArraySize(u32),

    /// Surface capabilities lack the texture bit.
    #[error("file is not a texture")]
    NotATexture,

    /// Bit count does not fit the uncompressed layout.
    #[error("unsupported {layout} bpp: {bpp}")]
    UnsupportedBpp { layout: &'static str, bpp: u32 },

    /// Uncompressed pixel format flags match no known layout.
    #[error("unknown pixel format in DDS file (flags {0:#x})")]
    UnknownPixelFormat(u32),

    /// Width or height is zero.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A dimension exceeds the configured limit.
    #[error("too large {dimension}: {found} exceeds {limit}")]
    TooLargeDimensions {
        dimension: &'static str,
        limit: usize,
        found: usize,
    },

    /// Block flip requested for a height no branch handles.
    #[error("cannot flip compressed image of height {0}")]
    UnsupportedFlipHeight(u32),

    /// Block flip requested for a format that is not block-compressed.
    #[error("cannot block-flip {0} data")]
    UnsupportedFlipFormat(PixelFormat),

    /// Block buffer is shorter than the block grid requires.
    #[error("block buffer too small: expected {expected} bytes, got {actual}")]
    BlockBufferTooSmall { expected: usize, actual: usize },
}

impl Error {
    /// Check if this error means the input ran out of bytes.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Common(e) if e.is_truncated())
    }
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
