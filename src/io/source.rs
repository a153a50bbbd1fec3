//! Random-access byte source
//!
//! A COG file is read by absolute offset: the header names the first
//! directory, directories name tile extents, and tiles sit anywhere in the
//! file. This module adapts the two kinds of input into one byte-addressable
//! reader: a seekable input is used directly, while a plain stream is
//! buffered whole on construction and served by index. The buffered case
//! additionally supports zero-copy slices, which the tile pipeline uses for
//! uncompressed tiles.

use std::borrow::Cow;
use std::io::{Read, Seek, SeekFrom};

use crate::io::seekable::SeekableReader;
use crate::tiff::errors::{CogError, CogResult};

/// Byte-addressable view over a COG input
pub enum ByteSource {
    /// Input that supports seeking; reads go straight to the reader
    Stream(Box<dyn SeekableReader>),
    /// Fully buffered input, served by index
    Buffered(Vec<u8>),
}

impl ByteSource {
    /// Wraps a seekable reader without buffering it
    pub fn from_seekable<R: SeekableReader + 'static>(reader: R) -> Self {
        ByteSource::Stream(Box::new(reader))
    }

    /// Buffers a sequential stream whole and serves it by index
    pub fn buffered<R: Read>(mut reader: R) -> CogResult<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(ByteSource::Buffered(data))
    }

    /// Reads exactly `buf.len()` bytes starting at `offset`
    ///
    /// A read past the end of the input is a format error: every offset the
    /// decoder follows was announced by the file itself.
    pub fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> CogResult<()> {
        match self {
            ByteSource::Stream(reader) => {
                reader.seek(SeekFrom::Start(offset))?;
                reader.read_exact(buf).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::UnexpectedEof {
                        short_read(offset, buf.len())
                    } else {
                        CogError::Io(e)
                    }
                })
            }
            ByteSource::Buffered(data) => {
                let end = offset as usize + buf.len();
                match data.get(offset as usize..end) {
                    Some(slice) => {
                        buf.copy_from_slice(slice);
                        Ok(())
                    }
                    None => Err(short_read(offset, buf.len())),
                }
            }
        }
    }

    /// Returns `len` bytes starting at `offset`
    ///
    /// The buffered case hands back a borrowed slice; the stream case
    /// allocates.
    pub fn bytes_at(&mut self, offset: u64, len: usize) -> CogResult<Cow<'_, [u8]>> {
        match self {
            ByteSource::Stream(_) => {
                let mut buf = vec![0u8; len];
                self.read_exact_at(offset, &mut buf)?;
                Ok(Cow::Owned(buf))
            }
            ByteSource::Buffered(data) => {
                let end = offset as usize + len;
                data.get(offset as usize..end)
                    .map(Cow::Borrowed)
                    .ok_or_else(|| short_read(offset, len))
            }
        }
    }
}

fn short_read(offset: u64, len: usize) -> CogError {
    CogError::Format(format!(
        "read of {} bytes at offset {} runs past the end of the file",
        len, offset
    ))
}
