//! Decoding of single-strip 16-bit grayscale TIFF images.

use std::io::{Read, Seek};

use crate::error::{TiffError, TiffResult};
use crate::layout;
use crate::tags::Tag;
use crate::{PixelBuffer, Rational};

pub mod ifd;
mod stream;

use self::ifd::Directory;
use self::stream::SmartReader;

/// Decoding limits, so a hostile header cannot force a huge allocation.
#[derive(Clone, Copy, Debug)]
pub struct Limits {
    /// Maximum size of the pixel strip in bytes.
    pub decoding_buffer_size: usize,
}

impl Default for Limits {
    fn default() -> Limits {
        Limits {
            decoding_buffer_size: 256 * 1024 * 1024,
        }
    }
}

/// Tiff decoder for the single-strip grayscale subset.
///
/// Construction validates the header, parses the directory and extracts
/// the strip geometry; [`read_image`](Decoder::read_image) then reads the
/// pixel data in one pass.
///
/// # Examples
/// ```
/// use tiff16::{decoder::Decoder, encoder::encode_to_vec, PixelBuffer};
///
/// let image = PixelBuffer::new(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let bytes = encode_to_vec(&image).unwrap();
///
/// let mut decoder = Decoder::new(std::io::Cursor::new(bytes)).unwrap();
/// assert_eq!(decoder.dimensions(), (3, 2));
/// assert_eq!(decoder.read_image().unwrap().samples(), [1, 2, 3, 4, 5, 6]);
/// ```
pub struct Decoder<R> {
    reader: SmartReader<R>,
    limits: Limits,
    directory: Directory,
    width: u32,
    height: u32,
    strip_offset: u32,
    strip_bytes: u32,
    x_resolution: Option<Rational>,
    y_resolution: Option<Rational>,
}

impl<R: Read + Seek> Decoder<R> {
    /// Create a new decoder, validating the header and the directory.
    pub fn new(reader: R) -> TiffResult<Decoder<R>> {
        let mut reader = SmartReader::wrap(reader);

        let mut marker = [0u8; 2];
        reader.read_exact(&mut marker)?;
        if marker != [0x49, 0x49] {
            return Err(TiffError::NotATiffFile);
        }
        if reader.read_u16()? != 42 {
            return Err(TiffError::NotATiffFile);
        }
        let ifd_offset = reader.read_u32()?;

        reader.goto_offset(u64::from(ifd_offset))?;
        let directory = Directory::from_reader(&mut reader)?;

        let width = directory.require(Tag::ImageWidth)?.as_unsigned()?;
        let height = directory.require(Tag::ImageLength)?.as_unsigned()?;
        let bits = directory.require(Tag::BitsPerSample)?.as_unsigned()?;
        let strip_offset = directory.require(Tag::StripOffsets)?.as_unsigned()?;
        let strip_bytes = directory.require(Tag::StripByteCounts)?.as_unsigned()?;

        if width == 0 || height == 0 {
            return Err(TiffError::MalformedDirectory(format!(
                "empty image geometry {}x{}",
                width, height
            )));
        }
        if bits != u32::from(layout::BITS_PER_SAMPLE) {
            return Err(TiffError::MalformedDirectory(format!(
                "expected {} bits per sample, found {}",
                layout::BITS_PER_SAMPLE,
                bits
            )));
        }
        if let Some(entry) = directory.get(Tag::Compression) {
            if entry.as_unsigned()? != u32::from(layout::COMPRESSION_NONE) {
                return Err(TiffError::MalformedDirectory(
                    "compressed strips are not supported".into(),
                ));
            }
        }
        if let Some(entry) = directory.get(Tag::SamplesPerPixel) {
            if entry.as_unsigned()? != u32::from(layout::SAMPLES_PER_PIXEL) {
                return Err(TiffError::MalformedDirectory(
                    "only one sample per pixel is supported".into(),
                ));
            }
        }
        let expected = u64::from(width) * u64::from(height) * u64::from(layout::BYTES_PER_SAMPLE);
        if u64::from(strip_bytes) != expected {
            return Err(TiffError::MalformedDirectory(format!(
                "strip of {} bytes cannot hold {}x{} samples",
                strip_bytes, width, height
            )));
        }

        let x_resolution = read_rational(&mut reader, &directory, Tag::XResolution)?;
        let y_resolution = read_rational(&mut reader, &directory, Tag::YResolution)?;

        Ok(Decoder {
            reader,
            limits: Limits::default(),
            directory,
            width,
            height,
            strip_offset,
            strip_bytes,
            x_resolution,
            y_resolution,
        })
    }

    pub fn with_limits(mut self, limits: Limits) -> Decoder<R> {
        self.limits = limits;
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// X and Y resolution, if the directory carried both rational tags.
    pub fn resolution(&self) -> Option<(Rational, Rational)> {
        Some((self.x_resolution?, self.y_resolution?))
    }

    /// The parsed directory, including entries this crate never consults.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Read the pixel strip into a buffer.
    pub fn read_image(&mut self) -> TiffResult<PixelBuffer> {
        let strip_len = self.strip_bytes as usize;
        if strip_len > self.limits.decoding_buffer_size {
            return Err(TiffError::LimitsExceeded);
        }

        self.reader.goto_offset(u64::from(self.strip_offset))?;
        let mut strip = vec![0u8; strip_len];
        self.reader.read_exact(&mut strip)?;

        let mut samples = Vec::with_capacity(strip_len / 2);
        for pair in strip.chunks_exact(2) {
            samples.push(u16::from_le_bytes([pair[0], pair[1]]));
        }
        PixelBuffer::new(self.width, self.height, samples)
    }
}

/// Dereference a RATIONAL entry's offset and read its 8-byte payload.
fn read_rational<R: Read + Seek>(
    reader: &mut SmartReader<R>,
    directory: &Directory,
    tag: Tag,
) -> TiffResult<Option<Rational>> {
    let entry = match directory.get(tag) {
        Some(entry) => entry,
        None => return Ok(None),
    };
    let offset = entry.as_rational_offset()?;
    reader.goto_offset(u64::from(offset))?;
    let n = reader.read_u32()?;
    let d = reader.read_u32()?;
    Ok(Some(Rational { n, d }))
}
