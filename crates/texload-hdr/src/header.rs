//! Radiance text header parsing.

use std::io::Read;

use log::trace;
use texload_common::{DecodeOptions, Diagnostics, LittleEndianReader, Warning};

use crate::{Error, Result};

/// Signature comments that identify a Radiance file.
const SIGNATURES: [&str; 2] = ["#?RADIANCE", "#?RGBE"];

/// Accepted values of the `FORMAT` command.
const FORMATS: [&str; 2] = ["32-bit_rle_rgbe", "32-bit_rle_xyze"];

/// Parsed Radiance header.
#[derive(Debug, Clone, PartialEq)]
pub struct HdrHeader {
    pub width: usize,
    pub height: usize,
    /// Lower-cased `FORMAT` value, if present.
    pub format: Option<String>,
    /// `EXPOSURE` value, not applied while decoding.
    pub exposure: Option<f32>,
    /// `GAMMA` value, not applied while decoding.
    pub gamma: Option<f32>,
    /// A signature comment was seen.
    pub verified: bool,
}

/// Read header lines up to and including the resolution line.
pub fn parse_header<R: Read>(
    reader: &mut LittleEndianReader<R>,
    options: &DecodeOptions,
    diagnostics: &mut dyn Diagnostics,
) -> Result<HdrHeader> {
    let mut format = None;
    let mut exposure = None;
    let mut gamma = None;
    let mut verified = false;

    let (width, height) = loop {
        let line = reader.read_line()?.ok_or(Error::MissingResolution)?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            if SIGNATURES.contains(&line) {
                verified = true;
            }
            continue;
        }

        if line.starts_with('+') || line.starts_with('-') {
            // resolution marks the start of pixel data
            break parse_resolution(line, diagnostics)?;
        }

        let Some(index) = line.find('=').filter(|&i| i >= 1) else {
            diagnostics.report(Warning::IgnoredHeaderLine {
                line: line.to_string(),
            });
            continue;
        };

        let key = line[..index].trim().to_lowercase();
        let value = line[index + 1..].trim().to_lowercase();
        match key.as_str() {
            "format" => {
                if !FORMATS.contains(&value.as_str()) {
                    return Err(Error::UnsupportedFormat(value));
                }
                format = Some(value);
            }
            "exposure" => exposure = Some(parse_float("exposure", &value)?),
            "gamma" => gamma = Some(parse_float("gamma", &value)?),
            _ => diagnostics.report(Warning::UnknownHeaderCommand {
                line: line.to_string(),
            }),
        }
    };

    if !verified {
        diagnostics.report(Warning::UnverifiedRadianceSignature);
    }

    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    check_limit("width", width, options.max_width())?;
    check_limit("height", height, options.max_height())?;

    trace!("Radiance {width}x{height} format={format:?} exposure={exposure:?} gamma={gamma:?}");

    Ok(HdrHeader {
        width,
        height,
        format,
        exposure,
        gamma,
        verified,
    })
}

/// Parse `-Y <height> +X <width>`.
///
/// Other orientations are reported but not applied; token 1 is always the
/// height and token 3 the width.
fn parse_resolution(line: &str, diagnostics: &mut dyn Diagnostics) -> Result<(usize, usize)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [first, height, second, width] = tokens[..] else {
        return Err(Error::MalformedResolution(line.to_string()));
    };

    if first != "-Y" || second != "+X" {
        diagnostics.report(Warning::OrientationIgnored {
            orientation: line.to_string(),
        });
    }

    let width = parse_int("width", width)?;
    let height = parse_int("height", height)?;
    Ok((width, height))
}

fn parse_int(key: &'static str, value: &str) -> Result<usize> {
    value.parse().map_err(|_| Error::MalformedHeaderValue {
        key,
        value: value.to_string(),
    })
}

fn parse_float(key: &'static str, value: &str) -> Result<f32> {
    value.parse().map_err(|_| Error::MalformedHeaderValue {
        key,
        value: value.to_string(),
    })
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
