//! DDS body decoding.

use std::io::Read;

use log::trace;
use texload_common::{zeroed_buffer, DecodeOptions, Diagnostics, LittleEndianReader, PixelFormat};

use crate::flip::flip;
use crate::header::{parse_header, ChannelMasks, DdsInfo, SourceLayout};
use crate::Result;

/// A fully decoded DDS texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsImage {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    /// Volume slices or cubemap faces.
    pub depth: u32,
    pub volume: bool,
    /// More than one face and not a volume.
    pub cubemap: bool,
    pub normal_map: bool,
    /// One buffer per cubemap face (+X, -X, +Y, -Y, +Z, -Z), otherwise a single
    /// buffer. Volume slices are concatenated into the single buffer.
    pub faces: Vec<Vec<u8>>,
    /// Byte size of each mip level within one face or slice.
    pub mip_sizes: Vec<usize>,
}

/// A DDS decoder over a byte stream.
///
/// # Example
///
/// ```no_run
/// use texload_common::{DecodeOptions, LogDiagnostics};
/// use texload_dds::DdsDecoder;
///
/// let file = std::io::BufReader::new(std::fs::File::open("texture.dds")?);
/// let mut decoder = DdsDecoder::new_with_options(file, DecodeOptions::default().set_flip_y(true));
/// let image = decoder.decode(&mut LogDiagnostics)?;
/// println!("{} {}x{}", image.format, image.width, image.height);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DdsDecoder<R> {
    reader: LittleEndianReader<R>,
    options: DecodeOptions,
    info: Option<DdsInfo>,
}

impl<R: Read> DdsDecoder<R> {
    /// Create a decoder with default options.
    pub fn new(source: R) -> Self {
        Self::new_with_options(source, DecodeOptions::default())
    }

    /// Create a decoder with the given options.
    pub fn new_with_options(source: R, options: DecodeOptions) -> Self {
        Self {
            reader: LittleEndianReader::new(source),
            options,
            info: None,
        }
    }

    /// Parse the header, if not already done.
    pub fn decode_headers(&mut self, diagnostics: &mut dyn Diagnostics) -> Result<&DdsInfo> {
        let info = match self.info.take() {
            Some(info) => info,
            None => {
                let info = parse_header(&mut self.reader, &self.options, diagnostics)?;
                trace!(
                    "DDS {}x{}x{} {} mips={} layout={:?}",
                    info.width,
                    info.height,
                    info.depth,
                    info.pixel_format,
                    info.mipmap_count,
                    info.layout
                );
                info
            }
        };
        Ok(self.info.insert(info))
    }

    /// Header info, once parsed.
    pub fn info(&self) -> Option<&DdsInfo> {
        self.info.as_ref()
    }

    /// Decode the whole texture.
    pub fn decode(&mut self, diagnostics: &mut dyn Diagnostics) -> Result<DdsImage> {
        let info = self.decode_headers(diagnostics)?.clone();
        let flip_y = self.options.flip_y();

        let faces = if info.volume {
            let mut all = Vec::new();
            for _ in 0..info.depth {
                all.extend(decode_surface(&mut self.reader, &info, flip_y)?);
            }
            vec![all]
        } else if info.is_cubemap() {
            (0..info.depth)
                .map(|_| decode_surface(&mut self.reader, &info, flip_y))
                .collect::<Result<Vec<_>>>()?
        } else {
            vec![decode_surface(&mut self.reader, &info, flip_y)?]
        };

        Ok(DdsImage {
            format: info.pixel_format,
            width: info.width,
            height: info.height,
            depth: info.depth,
            volume: info.volume,
            cubemap: info.is_cubemap(),
            normal_map: info.normal_map,
            faces,
            mip_sizes: info.mip_sizes,
        })
    }
}

/// Decode a DDS stream in one call.
pub fn decode_dds<R: Read>(
    source: R,
    options: DecodeOptions,
    diagnostics: &mut dyn Diagnostics,
) -> Result<DdsImage> {
    DdsDecoder::new_with_options(source, options).decode(diagnostics)
}

/// Decode one face or slice with all of its mip levels.
fn decode_surface<R: Read>(
    reader: &mut LittleEndianReader<R>,
    info: &DdsInfo,
    flip_y: bool,
) -> Result<Vec<u8>> {
    match info.layout {
        SourceLayout::Compressed => read_compressed(reader, info, flip_y),
        SourceLayout::GrayscaleOrAlpha => read_grayscale(reader, info, flip_y),
        SourceLayout::Rgb(masks) => read_rgb(reader, info, &masks, flip_y),
    }
}

/// Iterate `(level, width, height)` over the mip chain.
fn mip_levels(info: &DdsInfo) -> impl Iterator<Item = (usize, u32, u32)> + '_ {
    (0..info.mip_sizes.len()).scan((info.width, info.height), |dims, level| {
        let current = (level, dims.0, dims.1);
        *dims = ((dims.0 / 2).max(1), (dims.1 / 2).max(1));
        Some(current)
    })
}

fn read_compressed<R: Read>(
    reader: &mut LittleEndianReader<R>,
    info: &DdsInfo,
    flip_y: bool,
) -> Result<Vec<u8>> {
    trace!("Source image format: DXT");

    let mut buffer = Vec::new();
    for (level, mip_width, mip_height) in mip_levels(info) {
        let data = reader.read_vec(info.mip_sizes[level])?;
        if flip_y {
            buffer.extend(flip(&data, mip_width, mip_height, info.pixel_format)?);
        } else {
            buffer.extend(data);
        }
    }
    Ok(buffer)
}

fn read_grayscale<R: Read>(
    reader: &mut LittleEndianReader<R>,
    info: &DdsInfo,
    flip_y: bool,
) -> Result<Vec<u8>> {
    if info.bpp == 8 {
        trace!("Source image format: R8");
    }
    debug_assert_eq!(info.bpp, info.pixel_format.bits_per_pixel());

    let bytes_per_pixel = info.bpp as usize / 8;
    let mut buffer = Vec::new();
    for (level, mip_width, mip_height) in mip_levels(info) {
        let data = reader.read_vec(info.mip_sizes[level])?;
        if flip_y {
            buffer.extend(flip_scanlines(
                &data,
                mip_width as usize * bytes_per_pixel,
                mip_height as usize,
            ));
        } else {
            buffer.extend(data);
        }
    }
    Ok(buffer)
}

fn read_rgb<R: Read>(
    reader: &mut LittleEndianReader<R>,
    info: &DdsInfo,
    masks: &ChannelMasks,
    flip_y: bool,
) -> Result<Vec<u8>> {
    if masks.is_bgr8() {
        if masks.alpha == 0xFF00_0000 && info.bpp == 32 {
            trace!("Data source format: BGRA8");
        } else if info.bpp == 24 {
            trace!("Data source format: BGR8");
        }
    }

    let source_bytes = info.bpp as usize / 8;
    let target_bytes = info.pixel_format.bytes_per_pixel();
    let emitted = if masks.alpha == 0 { 3 } else { 4 };

    let mut buffer = zeroed_buffer(info.surface_size())?;
    let mut texel = [0u8; 4];
    let mut offset = 0;
    let mut cursor = 0;

    for (_, mip_width, mip_height) in mip_levels(info) {
        let (mip_width, mip_height) = (mip_width as usize, mip_height as usize);
        for y in 0..mip_height {
            for x in 0..mip_width {
                reader.read_exactly(&mut texel[..source_bytes])?;
                let packed = texel[..source_bytes]
                    .iter()
                    .rev()
                    .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));

                if flip_y {
                    cursor = offset + ((mip_height - y - 1) * mip_width + x) * target_bytes;
                }
                let channels = masks.extract(packed);
                // alpha is dropped from the output when there is no alpha mask
                buffer[cursor..cursor + emitted].copy_from_slice(&channels[..emitted]);
                cursor += emitted;
            }
        }

        offset += mip_width * mip_height * target_bytes;
    }

    Ok(buffer)
}

/// Reverse scanline order of an uncompressed level.
///
/// Bytes past `height` scanlines (mip padding) come out as zero.
pub fn flip_scanlines(data: &[u8], scanline_size: usize, height: usize) -> Vec<u8> {
    let mut flipped = vec![0u8; data.len()];
    for y in 0..height {
        let src = y * scanline_size;
        let dst = (height - y - 1) * scanline_size;
        flipped[dst..dst + scanline_size].copy_from_slice(&data[src..src + scanline_size]);
    }
    flipped
}

#[cfg(test)]
mod tests {
    use texload_common::Warning;

    use super::*;
    use crate::{Error, FourCC};

    const DDSD_CAPS_HEIGHT_WIDTH_PF: u32 = 0x1007;
    const DDSD_MIPMAPCOUNT: u32 = 0x20000;
    const DDSD_LINEARSIZE: u32 = 0x80000;
    const DDPF_FOURCC: u32 = 0x4;
    const DDPF_RGB: u32 = 0x40;
    const DDPF_ALPHAPIXELS: u32 = 0x1;
    const DDPF_GRAYSCALE: u32 = 0x20000;
    const CAPS_TEXTURE: u32 = 0x1000;
    const CAPS_MIPMAP: u32 = 0x40_0000;
    const CAPS2_CUBEMAP: u32 = 0x200;
    const CAPS2_VOLUME: u32 = 0x20_0000;

    /// Field values of a synthetic DDS header.
    #[derive(Clone)]
    struct Header {
        flags: u32,
        width: u32,
        height: u32,
        pitch: u32,
        depth: u32,
        mips: u32,
        pf_flags: u32,
        four_cc: [u8; 4],
        bpp: u32,
        masks: [u32; 4],
        caps1: u32,
        caps2: u32,
    }

    impl Header {
        fn compressed(four_cc: &[u8; 4], width: u32, height: u32) -> Self {
            Self {
                flags: DDSD_CAPS_HEIGHT_WIDTH_PF,
                width,
                height,
                pitch: 0,
                depth: 0,
                mips: 0,
                pf_flags: DDPF_FOURCC,
                four_cc: *four_cc,
                bpp: 0,
                masks: [0; 4],
                caps1: CAPS_TEXTURE,
                caps2: 0,
            }
        }

        fn uncompressed(pf_flags: u32, bpp: u32, masks: [u32; 4], width: u32, height: u32) -> Self {
            Self {
                pf_flags,
                four_cc: [0; 4],
                bpp,
                masks,
                ..Self::compressed(b"    ", width, height)
            }
        }

        fn bytes(&self) -> Vec<u8> {
            let mut out = Vec::new();
            let mut put = |v: u32| out.extend_from_slice(&v.to_le_bytes());
            put(0x2053_4444);
            put(124);
            put(self.flags);
            put(self.height);
            put(self.width);
            put(self.pitch);
            put(self.depth);
            put(self.mips);
            for _ in 0..11 {
                put(0);
            }
            put(32);
            put(self.pf_flags);
            put(u32::from_le_bytes(self.four_cc));
            put(self.bpp);
            for mask in self.masks {
                put(mask);
            }
            put(self.caps1);
            put(self.caps2);
            put(0);
            put(0);
            put(0);
            out
        }
    }

    fn decode(bytes: &[u8], flip_y: bool) -> (Result<DdsImage>, Vec<Warning>) {
        let mut warnings = Vec::new();
        let options = DecodeOptions::default().set_flip_y(flip_y);
        let result = decode_dds(bytes, options, &mut warnings);
        (result, warnings)
    }

    #[test]
    fn test_bad_magic_rejected_before_body() {
        let mut bytes = Header::compressed(b"DXT1", 4, 4).bytes();
        bytes[0] = b'X';
        let mut reader = LittleEndianReader::new(&bytes[..]);

        let err = parse_header(&mut reader, &DecodeOptions::default(), &mut ()).unwrap_err();
        assert!(matches!(err, Error::BadMagic { .. }));
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_missing_mandatory_flags() {
        let mut header = Header::compressed(b"DXT1", 4, 4);
        header.flags = 0x1;
        let (result, _) = decode(&header.bytes(), false);
        assert!(matches!(result, Err(Error::MissingMandatoryFlags(0x1))));
    }

    #[test]
    fn test_unknown_fourcc() {
        let (result, _) = decode(&Header::compressed(b"BC7X", 4, 4).bytes(), false);
        assert!(matches!(result, Err(Error::UnknownFourCC(FourCC(code))) if &code == b"BC7X"));
    }

    #[test]
    fn test_not_a_texture() {
        let mut header = Header::compressed(b"DXT1", 4, 4);
        header.caps1 = 0;
        let (result, _) = decode(&header.bytes(), false);
        assert!(matches!(result, Err(Error::NotATexture)));
    }

    #[test]
    fn test_bad_pixel_format_size() {
        let mut bytes = Header::compressed(b"DXT1", 4, 4).bytes();
        bytes[76..80].copy_from_slice(&24u32.to_le_bytes());
        let (result, _) = decode(&bytes, false);
        assert!(matches!(result, Err(Error::BadPixelFormatSize(24))));
    }

    #[test]
    fn test_unsupported_grayscale_bpp() {
        let header = Header::uncompressed(DDPF_GRAYSCALE, 24, [0xFF, 0, 0, 0], 4, 4);
        let (result, _) = decode(&header.bytes(), false);
        assert!(matches!(
            result,
            Err(Error::UnsupportedBpp { bpp: 24, .. })
        ));
    }

    #[test]
    fn test_unknown_pixel_format() {
        let header = Header::uncompressed(0, 32, [0; 4], 4, 4);
        let (result, _) = decode(&header.bytes(), false);
        assert!(matches!(result, Err(Error::UnknownPixelFormat(0))));
    }

    #[test]
    fn test_dxt1_single_block() {
        let block = [0x1F, 0x00, 0xE0, 0xFF, 0x00, 0x55, 0xAA, 0xFF];
        let mut bytes = Header::compressed(b"DXT1", 4, 4).bytes();
        bytes.extend_from_slice(&block);

        let (image, warnings) = decode(&bytes, false);
        let image = image.unwrap();
        assert!(warnings.is_empty());
        assert_eq!(image.format, PixelFormat::Dxt1);
        assert_eq!(image.mip_sizes, vec![8]);
        assert_eq!(image.faces, vec![block.to_vec()]);

        let (flipped, _) = decode(&bytes, true);
        assert_eq!(
            flipped.unwrap().faces,
            vec![flip(&block, 4, 4, PixelFormat::Dxt1).unwrap()]
        );
    }

    #[test]
    fn test_truncated_body() {
        let mut bytes = Header::compressed(b"DXT5", 8, 8).bytes();
        bytes.extend_from_slice(&[0; 40]);
        let (result, _) = decode(&bytes, false);
        assert!(result.unwrap_err().is_truncated());
    }

    #[test]
    fn test_linear_size_policy() {
        // flagged but zero: warn and use computed size
        let mut header = Header::compressed(b"DXT1", 8, 8);
        header.flags |= DDSD_LINEARSIZE;
        let header_bytes = header.bytes();
        let mut reader = LittleEndianReader::new(&header_bytes[..]);
        let mut warnings = Vec::new();
        let info = parse_header(&mut reader, &DecodeOptions::default(), &mut warnings).unwrap();
        assert_eq!(info.pitch_or_linear_size, 32);
        assert_eq!(warnings, vec![Warning::LinearSizeMissing { computed: 32 }]);

        // flagged and different: warn and keep declared
        header.pitch = 100;
        let header_bytes = header.bytes();
        let mut reader = LittleEndianReader::new(&header_bytes[..]);
        let mut warnings = Vec::new();
        let info = parse_header(&mut reader, &DecodeOptions::default(), &mut warnings).unwrap();
        assert_eq!(info.pitch_or_linear_size, 100);
        assert_eq!(
            warnings,
            vec![Warning::LinearSizeMismatch {
                expected: 32,
                declared: 100
            }]
        );
    }

    #[test]
    fn test_linear_size_of_huge_surface() {
        // 17500 * 17500 blocks * 16 bytes does not fit in 32 bits
        let mut header = Header::compressed(b"DXT5", 70_000, 70_000);
        header.flags |= DDSD_LINEARSIZE;
        header.pitch = 1;
        let options = DecodeOptions::default()
            .set_max_width(1 << 17)
            .set_max_height(1 << 17);
        let header_bytes = header.bytes();
        let mut reader = LittleEndianReader::new(&header_bytes[..]);
        let mut warnings = Vec::new();

        let info = parse_header(&mut reader, &options, &mut warnings).unwrap();
        assert_eq!(
            warnings,
            vec![Warning::LinearSizeMismatch {
                expected: 4_900_000_000,
                declared: 1
            }]
        );
        assert_eq!(info.pitch_or_linear_size, 1);
    }

    #[test]
    fn test_default_dimension_limits() {
        let (result, _) = decode(&Header::compressed(b"DXT1", 1 << 15, 4).bytes(), false);
        assert!(matches!(
            result,
            Err(Error::TooLargeDimensions {
                dimension: "width",
                limit: 16384,
                found: 32768
            })
        ));

        let mut header = Header::uncompressed(DDPF_GRAYSCALE, 8, [0xFF, 0, 0, 0], 2, 2);
        header.depth = u32::MAX;
        header.caps2 = CAPS2_VOLUME;
        let (result, _) = decode(&header.bytes(), false);
        assert!(matches!(
            result,
            Err(Error::TooLargeDimensions {
                dimension: "depth",
                ..
            })
        ));
    }

    #[test]
    fn test_volume_depth_beyond_data_is_truncated() {
        let mut header = Header::uncompressed(DDPF_GRAYSCALE, 8, [0xFF, 0, 0, 0], 2, 2);
        header.depth = 2048;
        header.caps2 = CAPS2_VOLUME;
        let mut bytes = header.bytes();
        bytes.extend([0u8; 8]);

        let (result, _) = decode(&bytes, false);
        assert!(result.unwrap_err().is_truncated());
    }

    #[test]
    fn test_mip_count_resolution() {
        let mut header = Header::compressed(b"DXT5", 16, 8);
        header.caps1 |= CAPS_MIPMAP;

        // no count field: full chain
        let header_bytes = header.bytes();
        let mut reader = LittleEndianReader::new(&header_bytes[..]);
        let info = parse_header(&mut reader, &DecodeOptions::default(), &mut ()).unwrap();
        assert_eq!(info.mipmap_count, 5);
        assert_eq!(info.mip_sizes, vec![128, 32, 16, 16, 16]);

        // declared short chain is kept with a warning
        header.flags |= DDSD_MIPMAPCOUNT;
        header.mips = 2;
        let header_bytes = header.bytes();
        let mut reader = LittleEndianReader::new(&header_bytes[..]);
        let mut warnings = Vec::new();
        let info = parse_header(&mut reader, &DecodeOptions::default(), &mut warnings).unwrap();
        assert_eq!(info.mipmap_count, 2);
        assert_eq!(
            warnings,
            vec![Warning::MipCountMismatch {
                expected: 5,
                declared: 2
            }]
        );

        // mipmap capability missing: a single level
        header.caps1 = CAPS_TEXTURE;
        let header_bytes = header.bytes();
        let mut reader = LittleEndianReader::new(&header_bytes[..]);
        let info = parse_header(&mut reader, &DecodeOptions::default(), &mut ()).unwrap();
        assert_eq!(info.mipmap_count, 1);
    }

    #[test]
    fn test_rgb_channel_masks() {
        let header = Header::uncompressed(
            DDPF_RGB | DDPF_ALPHAPIXELS,
            32,
            [0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0xFF00_0000],
            2,
            1,
        );
        let mut bytes = header.bytes();
        bytes.extend_from_slice(&0x4433_2211u32.to_le_bytes());
        bytes.extend_from_slice(&0x8877_6655u32.to_le_bytes());

        let (image, _) = decode(&bytes, false);
        let image = image.unwrap();
        assert_eq!(image.format, PixelFormat::Rgba8);
        assert_eq!(
            image.faces[0],
            vec![0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]
        );
    }

    #[test]
    fn test_rgb_without_alpha_mask_drops_alpha() {
        // RGBA8 requested by the flags, but the alpha mask is empty
        let header = Header::uncompressed(
            DDPF_RGB | DDPF_ALPHAPIXELS,
            24,
            [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0],
            2,
            1,
        );
        let mut bytes = header.bytes();
        bytes.extend_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

        let (image, _) = decode(&bytes, false);
        let image = image.unwrap();
        assert_eq!(image.format, PixelFormat::Rgba8);
        assert_eq!(image.mip_sizes, vec![8]);
        assert_eq!(image.faces[0], vec![0x03, 0x02, 0x01, 0x06, 0x05, 0x04, 0, 0]);
    }

    #[test]
    fn test_rgb_flip_writes_mirrored_rows() {
        let header = Header::uncompressed(
            DDPF_RGB,
            24,
            [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0],
            1,
            2,
        );
        let mut bytes = header.bytes();
        bytes.extend_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

        let (image, _) = decode(&bytes, true);
        let face = &image.unwrap().faces[0];
        assert_eq!(&face[..6], &[0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_grayscale_flip() {
        let header = Header::uncompressed(DDPF_GRAYSCALE, 8, [0xFF, 0, 0, 0], 2, 2);
        let mut bytes = header.bytes();
        bytes.extend_from_slice(&[1, 2, 3, 4]);

        let (image, _) = decode(&bytes, true);
        let image = image.unwrap();
        assert_eq!(image.format, PixelFormat::Luminance8);
        assert_eq!(image.faces[0], vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_cubemap_faces() {
        let mut header = Header::compressed(b"DXT1", 4, 4);
        header.caps2 = CAPS2_CUBEMAP;
        let mut bytes = header.bytes();
        for face in 0..6u8 {
            bytes.extend_from_slice(&[face; 8]);
        }

        let (image, _) = decode(&bytes, false);
        let image = image.unwrap();
        assert!(image.cubemap);
        assert!(!image.volume);
        assert_eq!(image.depth, 6);
        assert_eq!(image.faces.len(), 6);
        assert_eq!(image.faces[5], vec![5; 8]);
    }

    #[test]
    fn test_volume_slices_concatenate() {
        let mut header = Header::uncompressed(DDPF_GRAYSCALE, 8, [0xFF, 0, 0, 0], 2, 2);
        header.depth = 3;
        header.caps2 = CAPS2_VOLUME;
        let mut bytes = header.bytes();
        bytes.extend((0..12).collect::<Vec<u8>>());

        let (image, _) = decode(&bytes, false);
        let image = image.unwrap();
        assert!(image.volume);
        assert!(!image.cubemap);
        assert_eq!(image.faces, vec![(0..12).collect::<Vec<u8>>()]);
    }

    #[test]
    fn test_dx10_bc5() {
        let mut bytes = Header::compressed(b"DX10", 4, 4).bytes();
        for v in [83u32, 3, 0, 1, 0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes.extend_from_slice(&[7; 16]);

        let (image, _) = decode(&bytes, false);
        let image = image.unwrap();
        assert_eq!(image.format, PixelFormat::Latc);
        assert_eq!(image.faces, vec![vec![7; 16]]);
    }

    #[test]
    fn test_dx10_rejections() {
        let mut bytes = Header::compressed(b"DX10", 4, 4).bytes();
        for v in [71u32, 3, 0, 1, 0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let (result, _) = decode(&bytes, false);
        assert!(matches!(result, Err(Error::UnsupportedExtensionFormat(71))));

        let mut bytes = Header::compressed(b"DX10", 4, 4).bytes();
        for v in [83u32, 3, 0x4, 2, 0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let (result, _) = decode(&bytes, false);
        assert!(matches!(result, Err(Error::InvalidCubemapArraySize(2))));
    }

    #[test]
    fn test_flip_scanlines() {
        let data = [1, 2, 3, 4, 5, 6, 0, 0];
        assert_eq!(flip_scanlines(&data, 2, 3), vec![5, 6, 3, 4, 1, 2, 0, 0]);
    }

    #[test]
    fn test_flip_scanlines_drops_padding() {
        let data = [1, 2, 3, 9];
        assert_eq!(flip_scanlines(&data, 1, 3), vec![3, 2, 1, 0]);
    }
}
