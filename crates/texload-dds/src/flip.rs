//! Vertical flipping of block-compressed data.
//!
//! Blocks are never decoded to colors. Flipping moves whole block rows to the
//! mirrored block row and reverses the texel rows inside each block by
//! permuting the packed index bits.
//!
//! Block layouts (little-endian):
//!
//! | sub-block      | bytes  | texel rows                                 |
//! |----------------|--------|--------------------------------------------|
//! | color          | 0..4   | two RGB565 endpoints, untouched            |
//! |                | 4..8   | one byte of 2-bit indices per row          |
//! | explicit alpha | 0..8   | two bytes of 4-bit alpha per row           |
//! | interpolated   | 0..2   | two reference values, untouched            |
//! |                | 2..8   | 48-bit field, 3-bit code at `(4*y+x)*3`    |

use texload_common::PixelFormat;

use crate::{Error, Result};

/// Size of every sub-block in bytes.
const SUB_BLOCK_SIZE: usize = 8;

/// One 8-byte component of a compressed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubBlock {
    /// Endpoint colors plus 2-bit indices.
    Color,
    /// 4-bit alpha values.
    ExplicitAlpha,
    /// Two reference values plus 3-bit codes.
    Interpolated,
}

/// Block arrangement of a compressed format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// DXT1 with or without 1-bit alpha.
    Color,
    /// DXT3.
    ColorExplicitAlpha,
    /// DXT5.
    ColorInterpolatedAlpha,
    /// BC4 / LTC.
    SingleChannel,
    /// BC5 / LATC.
    DualChannel,
}

impl BlockKind {
    /// Block kind for a compressed pixel format.
    pub fn from_format(format: PixelFormat) -> Option<Self> {
        match format {
            PixelFormat::Dxt1 | PixelFormat::Dxt1A => Some(BlockKind::Color),
            PixelFormat::Dxt3 => Some(BlockKind::ColorExplicitAlpha),
            PixelFormat::Dxt5 => Some(BlockKind::ColorInterpolatedAlpha),
            PixelFormat::Ltc => Some(BlockKind::SingleChannel),
            PixelFormat::Latc => Some(BlockKind::DualChannel),
            _ => None,
        }
    }

    /// Sub-blocks in storage order.
    fn layout(self) -> &'static [SubBlock] {
        match self {
            BlockKind::Color => &[SubBlock::Color],
            BlockKind::ColorExplicitAlpha => &[SubBlock::ExplicitAlpha, SubBlock::Color],
            BlockKind::ColorInterpolatedAlpha => &[SubBlock::Interpolated, SubBlock::Color],
            BlockKind::SingleChannel => &[SubBlock::Interpolated],
            BlockKind::DualChannel => &[SubBlock::Interpolated, SubBlock::Interpolated],
        }
    }

    /// Bytes per 4x4 block.
    pub fn block_size(self) -> usize {
        self.layout().len() * SUB_BLOCK_SIZE
    }
}

/// Which texel rows of a block are exchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowFlip {
    /// Image is two texels high: rows 0 and 1 swap.
    TopPair,
    /// Rows 0 and 3 swap, rows 1 and 2 swap.
    Full,
}

impl RowFlip {
    /// Source row for destination row `y`.
    #[inline]
    const fn source_row(self, y: usize) -> usize {
        match self {
            RowFlip::TopPair => [1, 0, 2, 3][y],
            RowFlip::Full => 3 - y,
        }
    }
}

/// Flip a buffer of compressed blocks vertically.
///
/// `width` and `height` are in texels. Block columns never move; block rows
/// are mirrored and the texel rows inside every block are reversed. Applying
/// the flip twice with the same arguments restores the input.
///
/// # Errors
///
/// - [`Error::UnsupportedFlipFormat`] if `format` is not block-compressed
/// - [`Error::UnsupportedFlipHeight`] for heights of 0 or 3
/// - [`Error::BlockBufferTooSmall`] if `blocks` cannot hold the block grid
pub fn flip(blocks: &[u8], width: u32, height: u32, format: PixelFormat) -> Result<Vec<u8>> {
    let kind = BlockKind::from_format(format).ok_or(Error::UnsupportedFlipFormat(format))?;
    let block_size = kind.block_size();

    let blocks_x = width.div_ceil(4) as usize;
    let blocks_y = height.div_ceil(4) as usize;
    let expected = blocks_x * blocks_y * block_size;
    if blocks.len() < expected {
        return Err(Error::BlockBufferTooSmall {
            expected,
            actual: blocks.len(),
        });
    }

    let rows = match height {
        // a single texel row has nothing to reorder
        1 => return Ok(blocks.to_vec()),
        2 => RowFlip::TopPair,
        h if h >= 4 => RowFlip::Full,
        h => return Err(Error::UnsupportedFlipHeight(h)),
    };

    let row_size = blocks_x * block_size;
    let mut flipped = vec![0u8; expected];

    for (y, src_row) in blocks[..expected].chunks_exact(row_size).enumerate() {
        let dst_offset = (blocks_y - y - 1) * row_size;
        let dst_row = &mut flipped[dst_offset..dst_offset + row_size];

        for (src, dst) in src_row
            .chunks_exact(block_size)
            .zip(dst_row.chunks_exact_mut(block_size))
        {
            dst.copy_from_slice(src);
            flip_block(kind, dst, rows);
        }
    }

    Ok(flipped)
}

/// Reverse the texel rows of one block in place.
fn flip_block(kind: BlockKind, block: &mut [u8], rows: RowFlip) {
    for (sub, bytes) in kind
        .layout()
        .iter()
        .zip(block.chunks_exact_mut(SUB_BLOCK_SIZE))
    {
        let bytes: &mut [u8; SUB_BLOCK_SIZE] = match bytes.try_into() {
            Ok(b) => b,
            Err(_) => continue,
        };
        match sub {
            SubBlock::Color => flip_color(bytes, rows),
            SubBlock::ExplicitAlpha => flip_explicit_alpha(bytes, rows),
            SubBlock::Interpolated => flip_interpolated(bytes, rows),
        }
    }
}

/// Color block: the four index bytes after the endpoints are the rows.
fn flip_color(block: &mut [u8; SUB_BLOCK_SIZE], rows: RowFlip) {
    let indices = [block[4], block[5], block[6], block[7]];
    for y in 0..4 {
        block[4 + y] = indices[rows.source_row(y)];
    }
}

/// Explicit alpha block: each row is two bytes.
fn flip_explicit_alpha(block: &mut [u8; SUB_BLOCK_SIZE], rows: RowFlip) {
    let original = *block;
    for y in 0..4 {
        let src = rows.source_row(y) * 2;
        block[y * 2..y * 2 + 2].copy_from_slice(&original[src..src + 2]);
    }
}

/// Interpolated block: permute 3-bit codes inside the 48-bit field.
fn flip_interpolated(block: &mut [u8; SUB_BLOCK_SIZE], rows: RowFlip) {
    let mut field = [0u8; 8];
    field[..6].copy_from_slice(&block[2..8]);
    let codes = u64::from_le_bytes(field);

    let mut flipped = codes;
    for y in 0..4 {
        for x in 0..4 {
            flipped = write_code(flipped, x, y, read_code(codes, x, rows.source_row(y)));
        }
    }

    block[2..8].copy_from_slice(&flipped.to_le_bytes()[..6]);
}

#[inline]
fn read_code(field: u64, x: usize, y: usize) -> u64 {
    let shift = (4 * y + x) * 3;
    (field >> shift) & 0x7
}

#[inline]
fn write_code(field: u64, x: usize, y: usize, code: u64) -> u64 {
    let shift = (4 * y + x) * 3;
    (field & !(0x7 << shift)) | ((code & 0x7) << shift)
}
