//! Common utilities for texload.
//!
//! This crate provides the foundational pieces shared by every container decoder:
//!
//! - [`LittleEndianReader`] - Sequential little-endian reading over any [`std::io::Read`]
//! - [`PixelFormat`] - The closed catalog of output pixel formats
//! - [`Diagnostics`] - Injected sink for non-fatal decode warnings
//! - [`DecodeOptions`] - Per-call decode configuration

mod buffer;
mod diagnostics;
mod error;
mod format;
mod options;
mod reader;

pub use buffer::{checked_size, zeroed_buffer};
pub use diagnostics::{Diagnostics, LogDiagnostics, Warning};
pub use error::{Error, Result};
pub use format::PixelFormat;
pub use options::{DecodeOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_DIMENSION};
pub use reader::LittleEndianReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
