//! DDS texture decoding.
//!
//! Supports DXT1, DXT3, DXT5, ATI1/ATI2 (LTC/LATC), DX10 BC5, uncompressed
//! RGB/RGBA with arbitrary channel masks, and grayscale/alpha layouts. 2D
//! images, mipmap chains, cubemaps and volume textures are handled.
//!
//! Compressed data can be flipped vertically without decompressing it, see
//! [`flip`].
//!
//! # Example
//!
//! ```no_run
//! use texload_common::DecodeOptions;
//! use texload_dds::decode_dds;
//!
//! let data = std::fs::read("texture.dds")?;
//! let mut warnings = Vec::new();
//! let image = decode_dds(&data[..], DecodeOptions::default(), &mut warnings)?;
//! assert_eq!(image.faces.len(), if image.cubemap { 6 } else { 1 });
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decoder;
mod error;
mod header;

pub mod flip;

pub use decoder::{decode_dds, flip_scanlines, DdsDecoder, DdsImage};
pub use error::{Error, Result};
pub use flip::BlockKind;
pub use header::{
    mip_sizes, parse_header, ChannelMasks, DdsHeaderDxt10, DdsInfo, DdsPixelFormat, FourCC,
    SourceLayout, DDS_MAGIC,
};
