//! Error type for the loading entry points.

use std::io;

use thiserror::Error;

/// Errors returned by [`load_texture`](crate::load_texture) and friends.
#[derive(Debug, Error)]
pub enum Error {
    #[error("DDS: {0}")]
    Dds(#[from] texload_dds::Error),

    #[error("HDR: {0}")]
    Hdr(#[from] texload_hdr::Error),

    #[error("PFM: {0}")]
    Pfm(#[from] texload_pfm::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Neither the content nor the file name identify a known container.
    #[error("unknown texture container: {0}")]
    UnknownContainer(String),
}

impl Error {
    /// Check if the input ended before the texture was complete.
    pub fn is_truncated(&self) -> bool {
        match self {
            Error::Dds(e) => e.is_truncated(),
            Error::Hdr(e) => e.is_truncated(),
            Error::Pfm(e) => e.is_truncated(),
            Error::Io(_) | Error::UnknownContainer(_) => false,
        }
    }
}

/// Result type for texture loading.
pub type Result<T> = std::result::Result<T, Error>;
