//! All IO functionality needed for TIFF decoding

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};

/// Reader for the little-endian streams this crate decodes.
///
/// Only the offsets recorded in the directory are ever followed, so the
/// cursor moves strictly through [`goto_offset`](SmartReader::goto_offset)
/// and sequential reads.
pub struct SmartReader<R> {
    reader: R,
}

impl<R: Read> SmartReader<R> {
    /// Wraps a reader
    pub fn wrap(reader: R) -> SmartReader<R> {
        SmartReader { reader }
    }

    pub fn read_u16(&mut self) -> io::Result<u16> {
        self.reader.read_u16::<LittleEndian>()
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        self.reader.read_u32::<LittleEndian>()
    }
}

impl<R: Read + Seek> SmartReader<R> {
    pub fn goto_offset(&mut self, offset: u64) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(offset)).map(|_| ())
    }
}

impl<R: Read> Read for SmartReader<R> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}
