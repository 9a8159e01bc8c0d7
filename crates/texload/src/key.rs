//! Loading request context.

use std::path::{Path, PathBuf};

use texload_common::DecodeOptions;

/// Names a texture and how it should be decoded.
///
/// ```
/// use texload::TextureKey;
///
/// let key = TextureKey::new("sky.hdr").with_flip_y(true);
/// assert!(key.options().flip_y());
/// assert!(!key.options().force_rgbe());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TextureKey {
    name: PathBuf,
    flip_y: bool,
    force_rgbe: bool,
}

impl TextureKey {
    pub fn new(name: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_flip_y(mut self, yes: bool) -> Self {
        self.flip_y = yes;
        self
    }

    /// Keep Radiance pixels as raw RGBE bytes.
    #[must_use]
    pub fn with_force_rgbe(mut self, yes: bool) -> Self {
        self.force_rgbe = yes;
        self
    }

    pub fn name(&self) -> &Path {
        &self.name
    }

    pub fn flip_y(&self) -> bool {
        self.flip_y
    }

    pub fn force_rgbe(&self) -> bool {
        self.force_rgbe
    }

    /// Decoder options for this request, with default dimension limits.
    pub fn options(&self) -> DecodeOptions {
        DecodeOptions::from(self)
    }
}

impl From<&TextureKey> for DecodeOptions {
    fn from(key: &TextureKey) -> Self {
        DecodeOptions::default()
            .set_flip_y(key.flip_y)
            .set_force_rgbe(key.force_rgbe)
    }
}
