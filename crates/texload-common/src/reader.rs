//! Little-endian reader for sequential parsing of byte streams.
//!
//! This module provides [`LittleEndianReader`], a cursor-like wrapper over any
//! [`Read`] source. It tracks the stream offset for error reporting and keeps a
//! small look-ahead buffer so parsers can peek at bytes without consuming them.

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use zerocopy::FromBytes;

use crate::{Error, Result};

/// Terminator of text header lines.
const LINE_FEED: u8 = 0x0A;

/// A sequential little-endian reader over a byte stream.
///
/// # Example
///
/// ```
/// use texload_common::LittleEndianReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut reader = LittleEndianReader::new(&data[..]);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_u32().unwrap(), 0x08070605);
/// assert_eq!(reader.position(), 8);
/// ```
#[derive(Debug)]
pub struct LittleEndianReader<R> {
    inner: R,
    /// Bytes fetched by a peek and not yet consumed.
    lookahead: Vec<u8>,
    position: u64,
}

impl<R: Read> LittleEndianReader<R> {
    /// Create a new reader over a byte source.
    #[inline]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            lookahead: Vec::new(),
            position: 0,
        }
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Consume the reader, returning the underlying source.
    ///
    /// Bytes held by a pending peek are dropped.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read exactly `buf.len()` bytes.
    pub fn read_exactly(&mut self, buf: &mut [u8]) -> Result<()> {
        let offset = self.position;
        Read::read_exact(self, buf).map_err(|e| Error::from_read(e, buf.len(), offset))
    }

    /// Read `count` bytes into a freshly allocated buffer.
    ///
    /// The buffer grows with the data actually read, so a bogus `count` on a
    /// short stream fails as truncated rather than allocating up front.
    pub fn read_vec(&mut self, count: usize) -> Result<Vec<u8>> {
        let offset = self.position;
        let mut buf = Vec::new();
        self.by_ref().take(count as u64).read_to_end(&mut buf)?;
        if buf.len() < count {
            return Err(Error::TruncatedStream {
                needed: count,
                offset,
            });
        }
        Ok(buf)
    }

    /// Skip `count` bytes.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        let offset = self.position;
        let skipped = io::copy(&mut self.by_ref().take(count), &mut io::sink())?;
        if skipped < count {
            return Err(Error::TruncatedStream {
                needed: count as usize,
                offset,
            });
        }
        Ok(())
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        let offset = self.position;
        ReadBytesExt::read_u8(self).map_err(|e| Error::from_read(e, 1, offset))
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let offset = self.position;
        ReadBytesExt::read_u16::<LittleEndian>(self).map_err(|e| Error::from_read(e, 2, offset))
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let offset = self.position;
        ReadBytesExt::read_u32::<LittleEndian>(self).map_err(|e| Error::from_read(e, 4, offset))
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        let offset = self.position;
        ReadBytesExt::read_i32::<LittleEndian>(self).map_err(|e| Error::from_read(e, 4, offset))
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let offset = self.position;
        let bytes = self.read_vec(size)?;
        T::read_from_bytes(&bytes).map_err(|_| Error::TruncatedStream {
            needed: size,
            offset,
        })
    }

    /// Peek at the next `count` bytes without consuming them.
    pub fn peek_bytes(&mut self, count: usize) -> Result<&[u8]> {
        while self.lookahead.len() < count {
            let have = self.lookahead.len();
            self.lookahead.resize(count, 0);
            match self.inner.read(&mut self.lookahead[have..]) {
                Ok(0) => {
                    self.lookahead.truncate(have);
                    return Err(Error::TruncatedStream {
                        needed: count,
                        offset: self.position,
                    });
                }
                Ok(n) => self.lookahead.truncate(have + n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    self.lookahead.truncate(have);
                }
                Err(e) => {
                    self.lookahead.truncate(have);
                    return Err(Error::Io(e));
                }
            }
        }
        Ok(&self.lookahead[..count])
    }

    /// Read a line of text terminated by a single `0x0A` byte.
    ///
    /// The terminator is consumed but not returned. Reaching the end of the
    /// stream also ends the line. Returns `None` only when the stream is
    /// already exhausted. Bytes map one-to-one onto chars (Latin-1).
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let mut byte = [0u8; 1];
        let mut read_any = false;
        loop {
            let offset = self.position;
            let n = self
                .read(&mut byte)
                .map_err(|e| Error::from_read(e, 1, offset))?;
            if n == 0 {
                return Ok(read_any.then_some(line));
            }
            read_any = true;
            if byte[0] == LINE_FEED {
                return Ok(Some(line));
            }
            line.push(char::from(byte[0]));
        }
    }
}

impl<R: Read> Read for LittleEndianReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let n = if self.lookahead.is_empty() {
            self.inner.read(buf)?
        } else {
            let n = self.lookahead.len().min(buf.len());
            buf[..n].copy_from_slice(&self.lookahead[..n]);
            self.lookahead.drain(..n);
            n
        };
        self.position += n as u64;
        Ok(n)
    }
}
