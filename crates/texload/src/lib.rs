//! Texture container decoding.
//!
//! This crate ties the container decoders together behind one entry point:
//!
//! - [`texload_common`] - Byte reading, pixel formats, options and diagnostics
//! - [`texload_dds`] - DirectDraw Surface textures, including compressed block flipping
//! - [`texload_hdr`] - Radiance RGBE pictures
//! - [`texload_pfm`] - Portable float maps
//!
//! # Example
//!
//! ```no_run
//! use texload::prelude::*;
//!
//! let key = TextureKey::new("textures/rock.dds").with_flip_y(true);
//! let image = load_texture_file(key.name(), &key)?;
//! println!("{} {}x{} {:?}", image.format, image.width, image.height, image.kind);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod container;
mod error;
mod image;
mod key;
mod load;

pub use texload_common as common;
pub use texload_dds as dds;
pub use texload_hdr as hdr;
pub use texload_pfm as pfm;

pub use container::ContainerKind;
pub use error::{Error, Result};
pub use image::{Image, ImageInfo, TextureKind};
pub use key::TextureKey;
pub use load::{load_texture, load_texture_file, open_texture, read_info};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        load_texture, load_texture_file, open_texture, read_info, ContainerKind, Image, ImageInfo,
        TextureKey, TextureKind,
    };
    pub use texload_common::{DecodeOptions, Diagnostics, LogDiagnostics, PixelFormat, Warning};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
