//! Radiance RGBE (`.hdr`) decoding.
//!
//! Pixels are expanded from shared-exponent RGBE to half float RGB, or kept as
//! raw RGBE bytes when [`DecodeOptions::force_rgbe`] is set. Both the adaptive
//! run-length scanline encoding and flat scanlines are understood.
//!
//! [`DecodeOptions::force_rgbe`]: texload_common::DecodeOptions::force_rgbe

mod decoder;
mod error;
mod header;

pub use decoder::{convert_rgbe_to_float, decode_hdr, HdrDecoder, HdrImage};
pub use error::{Error, Result};
pub use header::{parse_header, HdrHeader};
