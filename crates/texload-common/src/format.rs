//! Output pixel format catalog.

/// Pixel layout of a decoded buffer.
///
/// The set is closed: every decoder maps its input onto one of these variants,
/// so lookups never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PixelFormat {
    /// BC1 color blocks without alpha.
    Dxt1,
    /// BC1 color blocks with 1-bit alpha.
    Dxt1A,
    /// BC2: explicit 4-bit alpha block followed by a BC1 color block.
    Dxt3,
    /// BC3: interpolated alpha block followed by a BC1 color block.
    Dxt5,
    /// BC4 / ATI1: single interpolated channel.
    Ltc,
    /// BC5 / ATI2: two interpolated channels.
    Latc,
    Rgb8,
    Rgba8,
    Luminance8,
    Luminance16,
    Luminance8Alpha8,
    Luminance16Alpha16,
    Alpha8,
    Alpha16,
    /// Three half-float channels.
    Rgb16F,
    /// Three single-precision float channels.
    Rgb32F,
    /// One single-precision float channel.
    Luminance32F,
}

impl PixelFormat {
    /// Bits used per texel.
    ///
    /// For block-compressed formats this is the averaged rate: a 4x4 block
    /// holds `16 * bits_per_pixel / 8` bytes.
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Dxt1 | PixelFormat::Dxt1A | PixelFormat::Ltc => 4,
            PixelFormat::Dxt3 | PixelFormat::Dxt5 | PixelFormat::Latc => 8,
            PixelFormat::Rgb8 => 24,
            PixelFormat::Rgba8 => 32,
            PixelFormat::Luminance8 | PixelFormat::Alpha8 => 8,
            PixelFormat::Luminance16 | PixelFormat::Alpha16 | PixelFormat::Luminance8Alpha8 => 16,
            PixelFormat::Luminance16Alpha16 | PixelFormat::Luminance32F => 32,
            PixelFormat::Rgb16F => 48,
            PixelFormat::Rgb32F => 96,
        }
    }

    /// Check if the format stores 4x4 compressed blocks.
    pub const fn is_compressed(self) -> bool {
        matches!(
            self,
            PixelFormat::Dxt1
                | PixelFormat::Dxt1A
                | PixelFormat::Dxt3
                | PixelFormat::Dxt5
                | PixelFormat::Ltc
                | PixelFormat::Latc
        )
    }

    /// Bytes per 4x4 block, or `None` for uncompressed formats.
    pub const fn block_size(self) -> Option<usize> {
        if self.is_compressed() {
            Some(self.bits_per_pixel() as usize * 2)
        } else {
            None
        }
    }

    /// Whole bytes per texel for uncompressed formats.
    pub const fn bytes_per_pixel(self) -> usize {
        self.bits_per_pixel() as usize / 8
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            PixelFormat::Dxt1 => "DXT1",
            PixelFormat::Dxt1A => "DXT1A",
            PixelFormat::Dxt3 => "DXT3",
            PixelFormat::Dxt5 => "DXT5",
            PixelFormat::Ltc => "LTC",
            PixelFormat::Latc => "LATC",
            PixelFormat::Rgb8 => "RGB8",
            PixelFormat::Rgba8 => "RGBA8",
            PixelFormat::Luminance8 => "Luminance8",
            PixelFormat::Luminance16 => "Luminance16",
            PixelFormat::Luminance8Alpha8 => "Luminance8Alpha8",
            PixelFormat::Luminance16Alpha16 => "Luminance16Alpha16",
            PixelFormat::Alpha8 => "Alpha8",
            PixelFormat::Alpha16 => "Alpha16",
            PixelFormat::Rgb16F => "RGB16F",
            PixelFormat::Rgb32F => "RGB32F",
            PixelFormat::Luminance32F => "Luminance32F",
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(PixelFormat::Dxt1, 8)]
    #[case(PixelFormat::Dxt1A, 8)]
    #[case(PixelFormat::Ltc, 8)]
    #[case(PixelFormat::Dxt3, 16)]
    #[case(PixelFormat::Dxt5, 16)]
    #[case(PixelFormat::Latc, 16)]
    fn test_block_sizes(#[case] format: PixelFormat, #[case] expected: usize) {
        assert!(format.is_compressed());
        assert_eq!(format.block_size(), Some(expected));
    }

    #[rstest]
    #[case(PixelFormat::Rgb8, 3)]
    #[case(PixelFormat::Rgba8, 4)]
    #[case(PixelFormat::Luminance16Alpha16, 4)]
    #[case(PixelFormat::Alpha8, 1)]
    #[case(PixelFormat::Rgb16F, 6)]
    #[case(PixelFormat::Rgb32F, 12)]
    #[case(PixelFormat::Luminance32F, 4)]
    fn test_uncompressed_sizes(#[case] format: PixelFormat, #[case] bytes: usize) {
        assert!(!format.is_compressed());
        assert_eq!(format.block_size(), None);
        assert_eq!(format.bytes_per_pixel(), bytes);
    }
}
