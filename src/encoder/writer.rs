use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

/// Writer that emits little-endian primitives and tracks the absolute
/// offset of the next byte, so the caller never needs to seek.
pub struct TiffWriter<W> {
    writer: W,
    offset: u64,
}

impl<W: Write> TiffWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, offset: 0 }
    }

    pub fn write_u16(&mut self, n: u16) -> Result<(), io::Error> {
        self.writer.write_u16::<LittleEndian>(n)?;
        self.offset += 2;

        Ok(())
    }

    pub fn write_u32(&mut self, n: u32) -> Result<(), io::Error> {
        self.writer.write_u32::<LittleEndian>(n)?;
        self.offset += 4;

        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.writer.flush()
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}
