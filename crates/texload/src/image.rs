//! Decoded image representation.

use texload_common::PixelFormat;
use texload_dds::{DdsImage, DdsInfo};
use texload_hdr::HdrImage;
use texload_pfm::PfmImage;

/// How the buffers of an [`Image`] are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TextureKind {
    TwoD,
    /// Six faces in +X, -X, +Y, -Y, +Z, -Z order.
    CubeMap,
    /// Slices concatenated in a single buffer.
    ThreeD,
}

impl TextureKind {
    fn from_layout(volume: bool, depth: u32) -> Self {
        if volume {
            TextureKind::ThreeD
        } else if depth > 1 {
            TextureKind::CubeMap
        } else {
            TextureKind::TwoD
        }
    }
}

/// A decoded texture ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub format: PixelFormat,
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub kind: TextureKind,
    /// One buffer per face, each holding the full mip chain.
    pub data: Vec<Vec<u8>>,
    /// Byte size of each mip level within a face or slice.
    pub mip_sizes: Vec<usize>,
    /// Source flagged the data as a normal map.
    pub normal_map: bool,
}

impl Image {
    /// Total bytes over all buffers.
    pub fn total_size(&self) -> usize {
        self.data.iter().map(Vec::len).sum()
    }

    pub fn face(&self, index: usize) -> Option<&[u8]> {
        self.data.get(index).map(Vec::as_slice)
    }

    /// One mip level of one face. For volumes this addresses the first slice.
    pub fn mip_level(&self, face: usize, level: usize) -> Option<&[u8]> {
        let size = *self.mip_sizes.get(level)?;
        let offset: usize = self.mip_sizes[..level].iter().sum();
        self.face(face)?.get(offset..offset + size)
    }

    /// Summary without the pixel data.
    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            format: self.format,
            width: self.width,
            height: self.height,
            depth: self.depth,
            kind: self.kind,
            mip_count: self.mip_sizes.len(),
            normal_map: self.normal_map,
        }
    }

    /// Wrap a single flat buffer without mipmaps.
    fn flat(format: PixelFormat, width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            format,
            width,
            height,
            depth: 1,
            kind: TextureKind::TwoD,
            mip_sizes: vec![data.len()],
            data: vec![data],
            normal_map: false,
        }
    }
}

impl From<DdsImage> for Image {
    fn from(image: DdsImage) -> Self {
        Self {
            format: image.format,
            width: image.width as usize,
            height: image.height as usize,
            depth: image.depth as usize,
            kind: TextureKind::from_layout(image.volume, image.depth),
            data: image.faces,
            mip_sizes: image.mip_sizes,
            normal_map: image.normal_map,
        }
    }
}

impl From<HdrImage> for Image {
    fn from(image: HdrImage) -> Self {
        Self::flat(image.format, image.width, image.height, image.data)
    }
}

impl From<PfmImage> for Image {
    fn from(image: PfmImage) -> Self {
        let header = image.header;
        Self::flat(header.format, header.width, header.height, image.data)
    }
}

/// Header level description of a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageInfo {
    pub format: PixelFormat,
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub kind: TextureKind,
    pub mip_count: usize,
    pub normal_map: bool,
}

impl From<&DdsInfo> for ImageInfo {
    fn from(info: &DdsInfo) -> Self {
        Self {
            format: info.pixel_format,
            width: info.width as usize,
            height: info.height as usize,
            depth: info.depth as usize,
            kind: TextureKind::from_layout(info.volume, info.depth),
            mip_count: info.mip_sizes.len(),
            normal_map: info.normal_map,
        }
    }
}

impl ImageInfo {
    pub(crate) fn flat(format: PixelFormat, width: usize, height: usize) -> Self {
        Self {
            format,
            width,
            height,
            depth: 1,
            kind: TextureKind::TwoD,
            mip_count: 1,
            normal_map: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Image {
        Image {
            format: PixelFormat::Luminance8,
            width: 4,
            height: 4,
            depth: 6,
            kind: TextureKind::CubeMap,
            data: (0..6u8).map(|face| vec![face; 16 + 4 + 1]).collect(),
            mip_sizes: vec![16, 4, 1],
            normal_map: false,
        }
    }

    #[test]
    fn test_total_size() {
        assert_eq!(cube().total_size(), 6 * 21);
    }

    #[test]
    fn test_mip_level() {
        let image = cube();
        assert_eq!(image.mip_level(2, 0).map(<[u8]>::len), Some(16));
        assert_eq!(image.mip_level(2, 1), Some(&[2u8; 4][..]));
        assert_eq!(image.mip_level(5, 2), Some(&[5u8][..]));
        assert_eq!(image.mip_level(0, 3), None);
        assert_eq!(image.mip_level(6, 0), None);
    }

    #[test]
    fn test_mip_level_short_buffer() {
        let mut image = cube();
        image.data[0].truncate(18);
        assert!(image.mip_level(0, 1).is_none());
        assert!(image.mip_level(0, 0).is_some());
    }

    #[test]
    fn test_kind_from_layout() {
        assert_eq!(TextureKind::from_layout(true, 4), TextureKind::ThreeD);
        assert_eq!(TextureKind::from_layout(false, 6), TextureKind::CubeMap);
        assert_eq!(TextureKind::from_layout(false, 1), TextureKind::TwoD);
    }

    #[test]
    fn test_info() {
        let info = cube().info();
        assert_eq!(info.kind, TextureKind::CubeMap);
        assert_eq!(info.mip_count, 3);
        assert_eq!(info.depth, 6);
    }
}
