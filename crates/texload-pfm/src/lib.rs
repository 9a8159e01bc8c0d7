//! Portable float map (`.pfm`) decoding.
//!
//! Both the three channel (`PF`) and the single channel (`Pf`) variants are
//! supported. Pixel data is converted to native byte order.

mod decoder;
mod error;

pub use decoder::{decode_pfm, parse_header, ByteOrder, PfmDecoder, PfmHeader, PfmImage};
pub use error::{Error, Result};
