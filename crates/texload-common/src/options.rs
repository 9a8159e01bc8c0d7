//! Decode options shared by every container decoder.

/// Largest accepted width or height unless configured otherwise.
pub const DEFAULT_MAX_DIMENSION: usize = 1 << 14;

/// Largest accepted volume depth unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 1 << 11;

/// Options that influence how a texture is decoded.
///
/// # Example
///
/// ```
/// use texload_common::DecodeOptions;
///
/// let options = DecodeOptions::default().set_flip_y(true).set_max_width(4096);
/// assert!(options.flip_y());
/// assert!(!options.force_rgbe());
/// assert_eq!(options.max_width(), 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    flip_y: bool,
    force_rgbe: bool,
    max_width: usize,
    max_height: usize,
    max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            flip_y: false,
            force_rgbe: false,
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Flip the image vertically while decoding.
    pub const fn flip_y(&self) -> bool {
        self.flip_y
    }

    /// Emit raw RGBE bytes instead of half floats (Radiance only).
    pub const fn force_rgbe(&self) -> bool {
        self.force_rgbe
    }

    /// Maximum accepted width.
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Maximum accepted height.
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Maximum accepted volume depth (DDS only).
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[must_use]
    pub const fn set_flip_y(mut self, yes: bool) -> Self {
        self.flip_y = yes;
        self
    }

    #[must_use]
    pub const fn set_force_rgbe(mut self, yes: bool) -> Self {
        self.force_rgbe = yes;
        self
    }

    #[must_use]
    pub const fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    #[must_use]
    pub const fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    #[must_use]
    pub const fn set_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
