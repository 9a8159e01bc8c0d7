//! Loading entry points.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;
use texload_common::{Diagnostics, LogDiagnostics};
use texload_dds::DdsDecoder;
use texload_hdr::HdrDecoder;
use texload_pfm::PfmDecoder;

use crate::{ContainerKind, Error, Image, ImageInfo, Result, TextureKey};

/// Decode a texture of a known container kind.
pub fn load_texture<R: Read>(
    reader: R,
    kind: ContainerKind,
    key: &TextureKey,
    diagnostics: &mut dyn Diagnostics,
) -> Result<Image> {
    let options = key.options();
    let image: Image = match kind {
        ContainerKind::Dds => DdsDecoder::new_with_options(reader, options)
            .decode(diagnostics)?
            .into(),
        ContainerKind::Radiance => HdrDecoder::new_with_options(reader, options)
            .decode(diagnostics)?
            .into(),
        ContainerKind::PortableFloatMap => PfmDecoder::new_with_options(reader, options)
            .decode()?
            .into(),
    };
    Ok(image)
}

/// Parse only the header of a texture.
pub fn read_info<R: Read>(
    reader: R,
    kind: ContainerKind,
    key: &TextureKey,
    diagnostics: &mut dyn Diagnostics,
) -> Result<ImageInfo> {
    let options = key.options();
    let info = match kind {
        ContainerKind::Dds => {
            let mut decoder = DdsDecoder::new_with_options(reader, options);
            ImageInfo::from(decoder.decode_headers(diagnostics)?)
        }
        ContainerKind::Radiance => {
            let mut decoder = HdrDecoder::new_with_options(reader, options);
            let format = decoder.output_format();
            let header = decoder.decode_headers(diagnostics)?;
            ImageInfo::flat(format, header.width, header.height)
        }
        ContainerKind::PortableFloatMap => {
            let header = PfmDecoder::new_with_options(reader, options).decode_headers()?;
            ImageInfo::flat(header.format, header.width, header.height)
        }
    };
    Ok(info)
}

/// Open a texture file and identify its container.
///
/// The content is sniffed first and the extension is the fallback.
pub fn open_texture(path: impl AsRef<Path>) -> Result<(BufReader<File>, ContainerKind)> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let kind = ContainerKind::detect(reader.fill_buf()?)
        .or_else(|| ContainerKind::from_extension(path))
        .ok_or_else(|| Error::UnknownContainer(path.display().to_string()))?;
    debug!("{} detected as {kind}", path.display());
    Ok((reader, kind))
}

/// Load a texture file, reporting warnings through the `log` facade.
pub fn load_texture_file(path: impl AsRef<Path>, key: &TextureKey) -> Result<Image> {
    let (reader, kind) = open_texture(path)?;
    load_texture(reader, kind, key, &mut LogDiagnostics)
}
