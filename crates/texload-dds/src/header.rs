//! DDS header structures and parsing.

use std::fmt;
use std::io::Read;

use texload_common::{DecodeOptions, Diagnostics, LittleEndianReader, PixelFormat, Warning};
use zerocopy::byteorder::{LittleEndian, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result};

/// DDS file magic ("DDS " read as a little-endian u32).
pub const DDS_MAGIC: u32 = 0x2053_4444;

/// Size of the main header, excluding the magic.
pub const HEADER_SIZE: u32 = 124;

/// Size of the embedded pixel format structure.
pub const PIXEL_FORMAT_SIZE: u32 = 32;

const DDSD_MANDATORY: u32 = 0x1007;
const DDSD_MANDATORY_DX10: u32 = 0x6;
const DDSD_MIPMAPCOUNT: u32 = 0x20000;
const DDSD_LINEARSIZE: u32 = 0x80000;

const DDPF_ALPHAPIXELS: u32 = 0x1;
const DDPF_ALPHA: u32 = 0x2;
const DDPF_FOURCC: u32 = 0x4;
const DDPF_RGB: u32 = 0x40;
// compressonator marks grayscale images with this, data lives in the red mask
const DDPF_GRAYSCALE: u32 = 0x20000;
// NVTextureTools marks normal maps with this
const DDPF_NORMAL: u32 = 0x8000_0000;

/// "RxGx" swizzle tag stored in the bit count field of DXT5 normal maps.
const SWIZZLE_XGXR: u32 = 0x7847_7852;

const DDSCAPS_TEXTURE: u32 = 0x1000;
const DDSCAPS_MIPMAP: u32 = 0x40_0000;
const DDSCAPS2_CUBEMAP: u32 = 0x200;
const DDSCAPS2_VOLUME: u32 = 0x20_0000;

/// Bytes between the mipmap count and the pixel format.
const RESERVED1_SIZE: u64 = 44;
/// caps3, caps4 and the trailing reserved word.
const RESERVED2_SIZE: u64 = 12;

/// Faces in a cubemap.
pub const CUBEMAP_FACES: u32 = 6;

/// Four-character code for compression type.
#[derive(Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// ATI1 (BC4) compression.
    pub const ATI1: Self = Self(*b"ATI1");
    /// ATI2 (BC5) compression.
    pub const ATI2: Self = Self(*b"ATI2");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.0.iter().map(|&b| char::from(b)).collect();
        write!(f, "{text:?} ({:#010x})", u32::from_le_bytes(self.0))
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: U32<LittleEndian>,
    /// Pixel format flags.
    pub flags: U32<LittleEndian>,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed), swizzle tag for DXT5.
    pub rgb_bit_count: U32<LittleEndian>,
    /// Red bit mask.
    pub r_bit_mask: U32<LittleEndian>,
    /// Green bit mask.
    pub g_bit_mask: U32<LittleEndian>,
    /// Blue bit mask.
    pub b_bit_mask: U32<LittleEndian>,
    /// Alpha bit mask.
    pub a_bit_mask: U32<LittleEndian>,
}

/// DX10 extended header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct DdsHeaderDxt10 {
    /// DXGI format.
    pub dxgi_format: U32<LittleEndian>,
    /// Resource dimension.
    pub resource_dimension: U32<LittleEndian>,
    /// Misc flags.
    pub misc_flag: U32<LittleEndian>,
    /// Array size.
    pub array_size: U32<LittleEndian>,
    /// Misc flags 2.
    pub misc_flags2: U32<LittleEndian>,
}

impl DdsHeaderDxt10 {
    /// BC5 UNORM format, the only one accepted.
    pub const BC5_UNORM: u32 = 83;
    /// Resource dimension of a volume texture.
    pub const DIMENSION_TEXTURE3D: u32 = 4;
    /// Misc flag marking a cubemap.
    pub const MISC_TEXTURECUBE: u32 = 0x4;
}

/// Channel bit masks of an uncompressed RGB layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
}

impl ChannelMasks {
    /// Pull the four channels out of a packed texel.
    ///
    /// Each channel is masked, shifted down by the mask's trailing zero count
    /// and truncated to a byte.
    #[inline]
    pub fn extract(&self, texel: u32) -> [u8; 4] {
        [
            channel(texel, self.red),
            channel(texel, self.green),
            channel(texel, self.blue),
            channel(texel, self.alpha),
        ]
    }

    /// Check for the common BGR(A)8 arrangement.
    pub fn is_bgr8(&self) -> bool {
        self.red == 0x00FF_0000 && self.green == 0x0000_FF00 && self.blue == 0x0000_00FF
    }
}

#[inline]
fn channel(texel: u32, mask: u32) -> u8 {
    if mask == 0 {
        0
    } else {
        ((texel & mask) >> mask.trailing_zeros()) as u8
    }
}

/// How texel data is stored after the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLayout {
    /// 4x4 compressed blocks.
    Compressed,
    /// Raw luminance and/or alpha samples, copied as-is.
    GrayscaleOrAlpha,
    /// Packed texels split apart with channel masks.
    Rgb(ChannelMasks),
}

/// Parsed and validated DDS header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsInfo {
    pub width: u32,
    pub height: u32,
    /// Slice count for volumes, face count (6) for cubemaps, else 1.
    pub depth: u32,
    pub mipmap_count: u32,
    pub pixel_format: PixelFormat,
    /// Source bits per texel.
    pub bpp: u32,
    pub layout: SourceLayout,
    pub volume: bool,
    pub normal_map: bool,
    /// Header carried the DX10 extension.
    pub dx10: bool,
    pub pitch_or_linear_size: u64,
    /// Byte size of each mip level, finest first.
    pub mip_sizes: Vec<usize>,
}

impl DdsInfo {
    /// Check if the data is block-compressed.
    pub fn is_compressed(&self) -> bool {
        self.layout == SourceLayout::Compressed
    }

    /// Multiple faces that are not volume slices.
    pub fn is_cubemap(&self) -> bool {
        self.depth > 1 && !self.volume
    }

    /// Bytes in one face or slice including all mip levels.
    pub fn surface_size(&self) -> usize {
        self.mip_sizes.iter().sum()
    }
}

/// Result of parsing the pixel format structure.
enum PixelFormatInfo {
    Known {
        format: PixelFormat,
        bpp: u32,
        layout: SourceLayout,
    },
    /// Real format lives in the DX10 header.
    Extended,
}

/// Linear field reads up to and including the pixel format.
struct RawHeader {
    flags: u32,
    height: u32,
    width: u32,
    pitch_or_linear_size: u64,
    depth: u32,
    mipmap_count: u32,
}

/// Parse the DDS header from the start of a stream.
///
/// On success the reader is positioned at the first byte of texel data.
pub fn parse_header<R: Read>(
    reader: &mut LittleEndianReader<R>,
    options: &DecodeOptions,
    diagnostics: &mut dyn Diagnostics,
) -> Result<DdsInfo> {
    let magic = reader.read_u32()?;
    let header_size = reader.read_u32()?;
    if magic != DDS_MAGIC || header_size != HEADER_SIZE {
        return Err(Error::BadMagic { magic, header_size });
    }

    let flags = reader.read_u32()?;
    if !is(flags, DDSD_MANDATORY) && !is(flags, DDSD_MANDATORY_DX10) {
        return Err(Error::MissingMandatoryFlags(flags));
    }

    let mut raw = RawHeader {
        flags,
        height: reader.read_u32()?,
        width: reader.read_u32()?,
        pitch_or_linear_size: u64::from(reader.read_u32()?),
        depth: reader.read_u32()?,
        mipmap_count: reader.read_u32()?,
    };
    reader.skip(RESERVED1_SIZE)?;

    if raw.width == 0 || raw.height == 0 {
        return Err(Error::InvalidDimensions {
            width: raw.width,
            height: raw.height,
        });
    }
    check_limit("width", raw.width, options.max_width())?;
    check_limit("height", raw.height, options.max_height())?;
    check_limit("depth", raw.depth, options.max_depth())?;

    let pf: DdsPixelFormat = reader.read_struct()?;
    let pf_info = read_pixel_format(&pf, &mut raw, diagnostics)?;
    let normal_flag = is(pf.flags.get(), DDPF_NORMAL);

    let caps1 = reader.read_u32()?;
    let caps2 = reader.read_u32()?;
    reader.skip(RESERVED2_SIZE)?;

    let mut depth = raw.depth.max(1);
    let mut volume = false;

    let dx10 = matches!(pf_info, PixelFormatInfo::Extended);
    if !dx10 {
        if !is(caps1, DDSCAPS_TEXTURE) {
            return Err(Error::NotATexture);
        }
        if is(caps2, DDSCAPS2_CUBEMAP) {
            // face count, not a real depth
            depth = CUBEMAP_FACES;
        }
        if is(caps2, DDSCAPS2_VOLUME) {
            volume = true;
        }
    }

    let expected_mipmaps = 1 + ceil_log2(raw.width.max(raw.height));
    let mipmap_count = if is(caps1, DDSCAPS_MIPMAP) {
        if !is(raw.flags, DDSD_MIPMAPCOUNT) {
            expected_mipmaps
        } else {
            if raw.mipmap_count != expected_mipmaps {
                // images often stop short of the full chain
                diagnostics.report(Warning::MipCountMismatch {
                    expected: expected_mipmaps,
                    declared: raw.mipmap_count,
                });
            }
            raw.mipmap_count.max(1)
        }
    } else {
        1
    };

    let (pixel_format, bpp, layout, normal_map) = match pf_info {
        PixelFormatInfo::Known {
            format,
            bpp,
            layout,
        } => {
            let swizzled = format == PixelFormat::Dxt5 && pf.rgb_bit_count.get() == SWIZZLE_XGXR;
            (format, bpp, layout, normal_flag || swizzled)
        }
        PixelFormatInfo::Extended => {
            let ext: DdsHeaderDxt10 = reader.read_struct()?;
            let dxgi_format = ext.dxgi_format.get();
            if dxgi_format != DdsHeaderDxt10::BC5_UNORM {
                return Err(Error::UnsupportedExtensionFormat(dxgi_format));
            }
            if ext.resource_dimension.get() == DdsHeaderDxt10::DIMENSION_TEXTURE3D {
                volume = true;
            }
            if is(ext.misc_flag.get(), DdsHeaderDxt10::MISC_TEXTURECUBE) {
                let array_size = ext.array_size.get();
                if array_size != CUBEMAP_FACES {
                    return Err(Error::InvalidCubemapArraySize(array_size));
                }
                depth = CUBEMAP_FACES;
            }
            (PixelFormat::Latc, 8, SourceLayout::Compressed, normal_flag)
        }
    };

    let mip_sizes = mip_sizes(raw.width, raw.height, mipmap_count, pixel_format);

    Ok(DdsInfo {
        width: raw.width,
        height: raw.height,
        depth,
        mipmap_count,
        pixel_format,
        bpp,
        layout,
        volume,
        normal_map,
        dx10,
        pitch_or_linear_size: raw.pitch_or_linear_size,
        mip_sizes,
    })
}

/// Interpret the pixel format structure.
fn read_pixel_format(
    pf: &DdsPixelFormat,
    raw: &mut RawHeader,
    diagnostics: &mut dyn Diagnostics,
) -> Result<PixelFormatInfo> {
    let size = pf.size.get();
    if size != PIXEL_FORMAT_SIZE {
        return Err(Error::BadPixelFormatSize(size));
    }

    let pf_flags = pf.flags.get();

    if is(pf_flags, DDPF_FOURCC) {
        let (format, bpp) = match pf.four_cc {
            FourCC::DXT1 if is(pf_flags, DDPF_ALPHAPIXELS) => (PixelFormat::Dxt1A, 4),
            FourCC::DXT1 => (PixelFormat::Dxt1, 4),
            FourCC::DXT3 => (PixelFormat::Dxt3, 8),
            FourCC::DXT5 => (PixelFormat::Dxt5, 8),
            FourCC::ATI1 => (PixelFormat::Ltc, 4),
            FourCC::ATI2 => (PixelFormat::Latc, 8),
            // the rest of the structure is not valid, the DX10 header has the real format
            FourCC::DX10 => return Ok(PixelFormatInfo::Extended),
            other => return Err(Error::UnknownFourCC(other)),
        };

        let size = u64::from(raw.width.div_ceil(4))
            * u64::from(raw.height.div_ceil(4))
            * u64::from(bpp)
            * 2;
        check_linear_size(raw, size, diagnostics);

        return Ok(PixelFormatInfo::Known {
            format,
            bpp,
            layout: SourceLayout::Compressed,
        });
    }

    let bpp = pf.rgb_bit_count.get();
    let (format, layout) = if is(pf_flags, DDPF_RGB) {
        if !matches!(bpp, 8 | 16 | 24 | 32) {
            return Err(Error::UnsupportedBpp { layout: "RGB", bpp });
        }
        let mut masks = ChannelMasks {
            red: pf.r_bit_mask.get(),
            green: pf.g_bit_mask.get(),
            blue: pf.b_bit_mask.get(),
            alpha: pf.a_bit_mask.get(),
        };
        if is(pf_flags, DDPF_ALPHAPIXELS) {
            (PixelFormat::Rgba8, SourceLayout::Rgb(masks))
        } else {
            // RGB8 output has no room for an alpha byte
            masks.alpha = 0;
            (PixelFormat::Rgb8, SourceLayout::Rgb(masks))
        }
    } else if is(pf_flags, DDPF_GRAYSCALE) && is(pf_flags, DDPF_ALPHAPIXELS) {
        let format = match bpp {
            16 => PixelFormat::Luminance8Alpha8,
            32 => PixelFormat::Luminance16Alpha16,
            _ => {
                return Err(Error::UnsupportedBpp {
                    layout: "GrayscaleAlpha",
                    bpp,
                })
            }
        };
        (format, SourceLayout::GrayscaleOrAlpha)
    } else if is(pf_flags, DDPF_GRAYSCALE) {
        let format = match bpp {
            8 => PixelFormat::Luminance8,
            16 => PixelFormat::Luminance16,
            _ => {
                return Err(Error::UnsupportedBpp {
                    layout: "Grayscale",
                    bpp,
                })
            }
        };
        (format, SourceLayout::GrayscaleOrAlpha)
    } else if is(pf_flags, DDPF_ALPHA) {
        let format = match bpp {
            8 => PixelFormat::Alpha8,
            16 => PixelFormat::Alpha16,
            _ => {
                return Err(Error::UnsupportedBpp {
                    layout: "Alpha",
                    bpp,
                })
            }
        };
        (format, SourceLayout::GrayscaleOrAlpha)
    } else {
        return Err(Error::UnknownPixelFormat(pf_flags));
    };

    let size = u64::from(bpp / 8) * u64::from(raw.width);
    check_linear_size(raw, size, diagnostics);

    Ok(PixelFormatInfo::Known {
        format,
        bpp,
        layout,
    })
}

/// Reconcile the declared pitch or linear size with the computed one.
///
/// A zero declared value is replaced, a different non-zero value is kept.
fn check_linear_size(raw: &mut RawHeader, computed: u64, diagnostics: &mut dyn Diagnostics) {
    if !is(raw.flags, DDSD_LINEARSIZE) {
        raw.pitch_or_linear_size = computed;
    } else if raw.pitch_or_linear_size == 0 {
        diagnostics.report(Warning::LinearSizeMissing { computed });
        raw.pitch_or_linear_size = computed;
    } else if raw.pitch_or_linear_size != computed {
        diagnostics.report(Warning::LinearSizeMismatch {
            expected: computed,
            declared: raw.pitch_or_linear_size,
        });
    }
}

/// Compute the byte size of every mip level, each rounded up to 4 bytes.
pub fn mip_sizes(width: u32, height: u32, mipmap_count: u32, format: PixelFormat) -> Vec<usize> {
    let out_bpp = format.bits_per_pixel() as usize;
    let mut mip_width = width as usize;
    let mut mip_height = height as usize;

    let mut sizes = Vec::with_capacity(mipmap_count as usize);
    for _ in 0..mipmap_count {
        let size = if format.is_compressed() {
            mip_width.div_ceil(4) * mip_height.div_ceil(4) * out_bpp * 2
        } else {
            mip_width * mip_height * out_bpp / 8
        };
        sizes.push(size.div_ceil(4) * 4);

        mip_width = (mip_width / 2).max(1);
        mip_height = (mip_height / 2).max(1);
    }
    sizes
}

/// `ceil(log2(n))` for `n >= 1`.
fn ceil_log2(n: u32) -> u32 {
    u32::BITS - n.saturating_sub(1).leading_zeros()
}

fn check_limit(dimension: &'static str, value: u32, limit: usize) -> Result<()> {
    if value as usize > limit {
        return Err(Error::TooLargeDimensions {
            dimension,
            limit,
            found: value as usize,
        });
    }
    Ok(())
}

/// Checks if flags contains every bit of the mask.
#[inline]
fn is(flags: u32, mask: u32) -> bool {
    flags & mask == mask
}
