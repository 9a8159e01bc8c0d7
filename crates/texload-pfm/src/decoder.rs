use std::io::Read;

use log::trace;
use texload_common::{checked_size, zeroed_buffer, DecodeOptions, LittleEndianReader, PixelFormat};

use crate::{Error, Result};

/// Byte order of the floats in a PFM body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the running platform.
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }

    /// A negative scale marks little endian data.
    pub fn from_scale(scale: f32) -> Self {
        if scale < 0.0 {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }
}

/// Parsed PFM header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PfmHeader {
    /// `Rgb32F` for `PF`, `Luminance32F` for `Pf`.
    pub format: PixelFormat,
    pub width: usize,
    pub height: usize,
    /// Absolute value is the scale factor, the sign selects the byte order.
    pub scale: f32,
    pub byte_order: ByteOrder,
}

/// A decoded float map in native byte order.
#[derive(Debug, Clone, PartialEq)]
pub struct PfmImage {
    pub header: PfmHeader,
    pub data: Vec<u8>,
}

/// Read the three header lines.
pub fn parse_header<R: Read>(
    reader: &mut LittleEndianReader<R>,
    options: &DecodeOptions,
) -> Result<PfmHeader> {
    let signature = read_token(reader)?;
    let format = match signature.as_str() {
        "PF" => PixelFormat::Rgb32F,
        "Pf" => PixelFormat::Luminance32F,
        _ => return Err(Error::BadSignature(signature)),
    };

    let dimensions = read_token(reader)?;
    let (width, height) = parse_dimensions(&dimensions)?;
    check_limit("width", width, options.max_width())?;
    check_limit("height", height, options.max_height())?;

    let scale = read_token(reader)?;
    let scale: f32 = scale
        .parse()
        .map_err(|_| Error::MalformedHeaderValue { key: "scale", value: scale })?;

    Ok(PfmHeader {
        format,
        width,
        height,
        scale,
        byte_order: ByteOrder::from_scale(scale),
    })
}

/// Next header line, trimmed. A missing line is a truncated stream.
fn read_token<R: Read>(reader: &mut LittleEndianReader<R>) -> Result<String> {
    let offset = reader.position();
    let line = reader
        .read_line()?
        .ok_or(texload_common::Error::TruncatedStream { needed: 1, offset })?;
    Ok(line.trim().to_string())
}

/// Split `W H` at the first space.
fn parse_dimensions(line: &str) -> Result<(usize, usize)> {
    let (width, height) = match line.find(' ') {
        Some(index) if index > 0 && index < line.len() - 1 => (&line[..index], &line[index + 1..]),
        _ => return Err(Error::InvalidDimensions(line.to_string())),
    };

    let parse = |key, value: &str| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::MalformedHeaderValue {
                key,
                value: value.to_string(),
            })
    };
    let width = parse("width", width)?;
    let height = parse("height", height)?;

    match (usize::try_from(width), usize::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(Error::InvalidDimensions(line.to_string())),
    }
}

fn check_limit(dimension: &'static str, value: usize, limit: usize) -> Result<()> {
    if value > limit {
        return Err(Error::TooLargeDimensions {
            dimension,
            limit,
            found: value,
        });
    }
    Ok(())
}

/// A PFM decoder over a byte stream.
pub struct PfmDecoder<R> {
    reader: LittleEndianReader<R>,
    options: DecodeOptions,
    header: Option<PfmHeader>,
}

impl<R: Read> PfmDecoder<R> {
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

    /// Parse the header, if not already done.
    pub fn decode_headers(&mut self) -> Result<PfmHeader> {
        if let Some(header) = self.header {
            return Ok(header);
        }
        let header = parse_header(&mut self.reader, &self.options)?;
        trace!(
            "PFM {}x{} {} scale={} {:?}",
            header.width,
            header.height,
            header.format,
            header.scale,
            header.byte_order
        );
        self.header = Some(header);
        Ok(header)
    }

    /// Decode the whole map.
    ///
    /// Scanlines keep file order (bottom to top) unless `flip_y` is set, in
    /// which case the last file row comes first.
    pub fn decode(&mut self) -> Result<PfmImage> {
        let header = self.decode_headers()?;
        let scanline_bytes =
            checked_size("scanline", &[header.width, header.format.bytes_per_pixel()])?;
        let swap = header.byte_order != ByteOrder::native();
        let mut data = zeroed_buffer(checked_size("image", &[scanline_bytes, header.height])?)?;

        for row in 0..header.height {
            let start = if self.options.flip_y() {
                (header.height - 1 - row) * scanline_bytes
            } else {
                row * scanline_bytes
            };
            let scanline = &mut data[start..start + scanline_bytes];
            self.reader.read_exactly(scanline)?;
            if swap {
                for float in scanline.chunks_exact_mut(4) {
                    float.reverse();
                }
            }
        }

        Ok(PfmImage { header, data })
    }
}

/// Decode a PFM stream in one call.
pub fn decode_pfm<R: Read>(source: R, options: DecodeOptions) -> Result<PfmImage> {
    PfmDecoder::new_with_options(source, options).decode()
}

#[cfg(test)]
mod tests {
    use byteorder::{BigEndian, ByteOrder as _, LittleEndian};
    use rstest::rstest;

    use super::*;

    fn pfm(signature: &str, dims: (usize, usize), scale: &str, floats: &[f32], big: bool) -> Vec<u8> {
        let mut out = format!("{signature}\n{} {}\n{scale}\n", dims.0, dims.1).into_bytes();
        let mut body = vec![0u8; floats.len() * 4];
        if big {
            BigEndian::write_f32_into(floats, &mut body);
        } else {
            LittleEndian::write_f32_into(floats, &mut body);
        }
        out.extend(body);
        out
    }

    fn floats(data: &[u8]) -> Vec<f32> {
        data.chunks_exact(4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect()
    }

    #[rstest]
    #[case("-1.0", false)]
    #[case("1.0", true)]
    fn test_byte_order_is_normalised(#[case] scale: &str, #[case] big: bool) {
        let values = [1.5, -2.0, 0.25];
        let image = decode_pfm(&pfm("PF", (1, 1), scale, &values, big)[..], DecodeOptions::default())
            .unwrap();

        assert_eq!(image.header.format, PixelFormat::Rgb32F);
        let expected = if big {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        };
        assert_eq!(image.header.byte_order, expected);
        assert_eq!(floats(&image.data), values);
    }

    #[test]
    fn test_row_order() {
        // file rows: bottom (1.0) then top (2.0)
        let data = pfm("Pf", (2, 2), "-1", &[1.0, 1.0, 2.0, 2.0], false);

        let image = decode_pfm(&data[..], DecodeOptions::default()).unwrap();
        assert_eq!(image.header.format, PixelFormat::Luminance32F);
        assert_eq!(floats(&image.data), vec![1.0, 1.0, 2.0, 2.0]);

        let flipped = decode_pfm(&data[..], DecodeOptions::default().set_flip_y(true)).unwrap();
        assert_eq!(floats(&flipped.data), vec![2.0, 2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_default_limits_reject_huge_map() {
        let result = decode_pfm(&b"PF
20000 20000
-1
"[..], DecodeOptions::default());
        assert!(matches!(
            result,
            Err(Error::TooLargeDimensions {
                dimension: "width",
                limit: 16384,
                found: 20000
            })
        ));
    }

    #[test]
    fn test_scale_is_exposed() {
        let image = decode_pfm(&pfm("Pf", (1, 1), "-0.5", &[3.0], false)[..], DecodeOptions::default())
            .unwrap();
        assert_eq!(image.header.scale, -0.5);
    }

    #[test]
    fn test_bad_signature() {
        let result = decode_pfm(&b"P6\n1 1\n-1\n"[..], DecodeOptions::default());
        assert!(matches!(result, Err(Error::BadSignature(s)) if s == "P6"));
    }

    #[rstest]
    #[case("4")]
    #[case(" 4")]
    #[case("4 ")]
    #[case("0 4")]
    #[case("4 -1")]
    fn test_invalid_dimensions(#[case] line: &str) {
        let data = format!("PF\n{line}\n-1\n");
        let result = decode_pfm(data.as_bytes(), DecodeOptions::default());
        assert!(matches!(result, Err(Error::InvalidDimensions(_))), "{line:?}");
    }

    #[rstest]
    #[case("PF\nfour 4\n-1\n", "width")]
    #[case("PF\n4 x\n-1\n", "height")]
    #[case("PF\n4 4\nbig\n", "scale")]
    fn test_malformed_values(#[case] data: &str, #[case] expected_key: &str) {
        let result = decode_pfm(data.as_bytes(), DecodeOptions::default());
        assert!(matches!(result, Err(Error::MalformedHeaderValue { key, .. }) if key == expected_key));
    }

    #[test]
    fn test_truncated_body() {
        let mut data = pfm("PF", (2, 2), "-1", &[0.0; 12], false);
        data.truncate(data.len() - 5);
        let result = decode_pfm(&data[..], DecodeOptions::default());
        assert!(result.unwrap_err().is_truncated());
    }

    #[test]
    fn test_truncated_header() {
        let result = decode_pfm(&b"PF\n"[..], DecodeOptions::default());
        assert!(result.unwrap_err().is_truncated());
    }

    #[test]
    fn test_too_large() {
        let data = pfm("Pf", (8, 1), "-1", &[0.0; 8], false);
        let result = decode_pfm(&data[..], DecodeOptions::default().set_max_width(4));
        assert!(matches!(result, Err(Error::TooLargeDimensions { found: 8, .. })));
    }
}
