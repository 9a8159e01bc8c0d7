//! Radiance scanline decoding.

use std::io::Read;

use half::f16;
use texload_common::{
    checked_size, zeroed_buffer, DecodeOptions, Diagnostics, LittleEndianReader, PixelFormat,
};

use crate::header::{parse_header, HdrHeader};
use crate::{Error, Result};

/// Scanlines narrower or wider than this are never run-length encoded.
const MIN_RLE_WIDTH: usize = 8;
const MAX_RLE_WIDTH: usize = 0x7fff;

/// A decoded Radiance picture.
#[derive(Debug, Clone, PartialEq)]
pub struct HdrImage {
    /// `Rgb16F`, or `Rgba8` holding raw RGBE quadruples.
    pub format: PixelFormat,
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
    pub header: HdrHeader,
}

/// A Radiance decoder over a byte stream.
pub struct HdrDecoder<R> {
    reader: LittleEndianReader<R>,
    options: DecodeOptions,
    header: Option<HdrHeader>,
}

impl<R: Read> HdrDecoder<R> {
    pub fn new(source: R) -> Self {
        Self::new_with_options(source, DecodeOptions::default())
    }

    pub fn new_with_options(source: R, options: DecodeOptions) -> Self {
        Self {
            reader: LittleEndianReader::new(source),
            options,
            header: None,
        }
    }

    /// Parse the text header, if not already done.
    pub fn decode_headers(&mut self, diagnostics: &mut dyn Diagnostics) -> Result<&HdrHeader> {
        let header = match self.header.take() {
            Some(header) => header,
            None => parse_header(&mut self.reader, &self.options, diagnostics)?,
        };
        Ok(self.header.insert(header))
    }

    /// Output format chosen by the options.
    pub fn output_format(&self) -> PixelFormat {
        if self.options.force_rgbe() {
            PixelFormat::Rgba8
        } else {
            PixelFormat::Rgb16F
        }
    }

    /// Decode the whole picture.
    pub fn decode(&mut self, diagnostics: &mut dyn Diagnostics) -> Result<HdrImage> {
        let header = self.decode_headers(diagnostics)?.clone();
        let format = self.output_format();
        let (width, height) = (header.width, header.height);

        let scanline_bytes = checked_size("scanline", &[width, format.bytes_per_pixel()])?;
        let mut data = zeroed_buffer(checked_size("picture", &[scanline_bytes, height])?)?;
        let mut scratch = Vec::with_capacity(width * 4);
        let mut writer = TexelWriter {
            force_rgbe: self.options.force_rgbe(),
            position: 0,
        };

        for row in 0..height {
            if self.options.flip_y() {
                writer.position = scanline_bytes * (height - 1 - row);
            }
            self.decode_scanline(width, &mut scratch, &mut data, &mut writer)?;
        }

        Ok(HdrImage {
            format,
            width,
            height,
            data,
            header,
        })
    }

    fn decode_scanline(
        &mut self,
        width: usize,
        scratch: &mut Vec<u8>,
        out: &mut [u8],
        writer: &mut TexelWriter,
    ) -> Result<()> {
        if !(MIN_RLE_WIDTH..=MAX_RLE_WIDTH).contains(&width) {
            return self.decode_flat(width, out, writer);
        }

        let marker = self.reader.peek_bytes(4)?;
        if marker[0] != 2 || marker[1] != 2 || marker[2] & 0x80 != 0 {
            return self.decode_flat(width, out, writer);
        }

        let mut marker = [0u8; 4];
        self.reader.read_exactly(&mut marker)?;
        let encoded = usize::from(u16::from_be_bytes([marker[2], marker[3]]));
        if encoded != width {
            return Err(Error::ScanlineWidthMismatch {
                expected: width,
                found: encoded,
            });
        }

        scratch.clear();
        scratch.resize(width * 4, 0);
        for channel in 0..4 {
            self.decode_channel(width, channel, scratch)?;
        }
        for texel in scratch.chunks_exact(4) {
            writer.write(out, texel);
        }
        Ok(())
    }

    /// Expand the runs of one channel into every fourth byte of `scratch`.
    fn decode_channel(&mut self, width: usize, channel: usize, scratch: &mut [u8]) -> Result<()> {
        let mut x = 0;
        while x < width {
            let code = self.reader.read_u8()?;
            if code > 128 {
                let count = usize::from(code - 128);
                check_run(code, x, count, width)?;
                let value = self.reader.read_u8()?;
                for i in x..x + count {
                    scratch[i * 4 + channel] = value;
                }
                x += count;
            } else {
                let count = usize::from(code);
                check_run(code, x, count, width)?;
                for i in x..x + count {
                    scratch[i * 4 + channel] = self.reader.read_u8()?;
                }
                x += count;
            }
        }
        Ok(())
    }

    /// Plain RGBE quadruples, one read for every third texel.
    fn decode_flat(&mut self, width: usize, out: &mut [u8], writer: &mut TexelWriter) -> Result<()> {
        let mut rgbe = [0u8; 4];
        for _ in (0..width).step_by(3) {
            self.reader.read_exactly(&mut rgbe)?;
            writer.write(out, &rgbe);
        }
        Ok(())
    }
}

fn check_run(code: u8, position: usize, count: usize, width: usize) -> Result<()> {
    if count == 0 || position + count > width {
        return Err(Error::InvalidRunLength {
            code,
            position,
            width,
        });
    }
    Ok(())
}

/// Output cursor shared across scanlines.
struct TexelWriter {
    force_rgbe: bool,
    position: usize,
}

impl TexelWriter {
    fn write(&mut self, out: &mut [u8], rgbe: &[u8]) {
        if self.force_rgbe {
            out[self.position..self.position + 4].copy_from_slice(rgbe);
            self.position += 4;
            return;
        }
        for value in convert_rgbe_to_float([rgbe[0], rgbe[1], rgbe[2], rgbe[3]]) {
            let bits = f16::from_f32(value).to_bits();
            out[self.position..self.position + 2].copy_from_slice(&bits.to_ne_bytes());
            self.position += 2;
        }
    }
}

/// Convert one RGBE quadruple to linear floats.
///
/// Each component is `c * 2^(e - 136)`, so a zero exponent still yields a
/// tiny non-zero value for non-zero mantissas.
///
/// ```
/// use texload_hdr::convert_rgbe_to_float;
///
/// assert_eq!(convert_rgbe_to_float([128, 64, 0, 129]), [1.0, 0.5, 0.0]);
/// ```
pub fn convert_rgbe_to_float(rgbe: [u8; 4]) -> [f32; 3] {
    let scale = 2f64.powi(i32::from(rgbe[3]) - 136);
    [0, 1, 2].map(|i| (f64::from(rgbe[i]) * scale) as f32)
}

/// Decode a Radiance stream in one call.
pub fn decode_hdr<R: Read>(
    source: R,
    options: DecodeOptions,
    diagnostics: &mut dyn Diagnostics,
) -> Result<HdrImage> {
    HdrDecoder::new_with_options(source, options).decode(diagnostics)
}
