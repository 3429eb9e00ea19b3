//! Encoding of single-strip 16-bit grayscale TIFF images.

use std::io::Write;

use crate::error::{TiffError, TiffResult};
use crate::layout;
use crate::tags::{Tag, Type};
use crate::{PixelBuffer, Rational};

mod writer;

use self::writer::TiffWriter;

/// Value slot of a 12-byte directory entry.
///
/// `Short` and `Long` values are stored inline; a `Rational` stores the
/// absolute offset of its 8-byte payload, which the directory builder
/// resolves before any entry is written.
#[derive(Clone, Copy, Debug)]
enum TagValue {
    Short(u16),
    Long(u32),
    Rational { offset: u32 },
}

/// One directory entry with its value or payload offset resolved.
#[derive(Clone, Copy, Debug)]
struct TagEntry {
    tag: Tag,
    value: TagValue,
}

impl TagEntry {
    fn short(tag: Tag, value: u16) -> Self {
        TagEntry {
            tag,
            value: TagValue::Short(value),
        }
    }

    fn long(tag: Tag, value: u32) -> Self {
        TagEntry {
            tag,
            value: TagValue::Long(value),
        }
    }

    fn rational(tag: Tag, offset: u32) -> Self {
        TagEntry {
            tag,
            value: TagValue::Rational { offset },
        }
    }

    /// Serialize the fixed 12-byte record: id, type, count = 1, value slot.
    fn write<W: Write>(&self, writer: &mut TiffWriter<W>) -> TiffResult<()> {
        writer.write_u16(self.tag.to_u16())?;
        match self.value {
            TagValue::Short(v) => {
                writer.write_u16(Type::SHORT.to_u16())?;
                writer.write_u32(1)?;
                writer.write_u16(v)?;
                // pad the 4-byte value slot
                writer.write_u16(0)?;
            }
            TagValue::Long(v) => {
                writer.write_u16(Type::LONG.to_u16())?;
                writer.write_u32(1)?;
                writer.write_u32(v)?;
            }
            TagValue::Rational { offset } => {
                writer.write_u16(Type::RATIONAL.to_u16())?;
                writer.write_u32(1)?;
                writer.write_u32(offset)?;
            }
        }
        Ok(())
    }
}

/// Build the thirteen fixed entries and the out-of-line rational payloads
/// for one image, every offset resolved against [`layout`].
///
/// Entries are listed in ascending tag order. Width and height are stored
/// as SHORT values, so either dimension above `u16::MAX` is rejected, as
/// is a strip byte count that does not fit the LONG entry.
fn build_directory(width: u32, height: u32) -> TiffResult<(Vec<TagEntry>, [Rational; 2])> {
    if width == 0
        || height == 0
        || width > u32::from(u16::MAX)
        || height > u32::from(u16::MAX)
    {
        return Err(TiffError::InvalidGeometry { width, height });
    }
    let strip_bytes = u64::from(width) * u64::from(height) * u64::from(layout::BYTES_PER_SAMPLE);
    let strip_bytes = u32::try_from(strip_bytes)
        .map_err(|_| TiffError::InvalidGeometry { width, height })?;

    let resolution = Rational {
        n: layout::RESOLUTION_DPI,
        d: 1,
    };
    let entries = vec![
        TagEntry::long(Tag::NewSubfileType, 0),
        TagEntry::short(Tag::ImageWidth, width as u16),
        TagEntry::short(Tag::ImageLength, height as u16),
        TagEntry::short(Tag::BitsPerSample, layout::BITS_PER_SAMPLE),
        TagEntry::short(Tag::Compression, layout::COMPRESSION_NONE),
        TagEntry::short(Tag::PhotometricInterpretation, layout::BLACK_IS_ZERO),
        TagEntry::long(Tag::StripOffsets, layout::STRIP_OFFSET),
        TagEntry::short(Tag::SamplesPerPixel, layout::SAMPLES_PER_PIXEL),
        TagEntry::short(Tag::RowsPerStrip, height as u16),
        TagEntry::long(Tag::StripByteCounts, strip_bytes),
        TagEntry::rational(Tag::XResolution, layout::OVERFLOW_OFFSET),
        TagEntry::rational(Tag::YResolution, layout::OVERFLOW_OFFSET + layout::RATIONAL_BYTES),
        TagEntry::short(Tag::ResolutionUnit, layout::RESOLUTION_UNIT_INCH),
    ];
    debug_assert_eq!(entries.len(), usize::from(layout::ENTRY_COUNT));

    Ok((entries, [resolution, resolution]))
}

/// Tiff encoder.
///
/// Writes the 8-byte header on construction; [`write_image`] then emits
/// the directory, the rational payloads and the pixel strip in one pass.
///
/// # Examples
/// ```
/// use tiff16::{encoder::TiffEncoder, PixelBuffer};
///
/// let image = PixelBuffer::new(4, 4, vec![0; 16]).unwrap();
/// let mut bytes = Vec::new();
/// TiffEncoder::new(&mut bytes).unwrap().write_image(&image).unwrap();
/// ```
///
/// [`write_image`]: TiffEncoder::write_image
pub struct TiffEncoder<W> {
    writer: TiffWriter<W>,
}

impl<W: Write> TiffEncoder<W> {
    pub fn new(writer: W) -> TiffResult<TiffEncoder<W>> {
        let mut writer = TiffWriter::new(writer);

        writer.write_u16(0x4949)?;
        writer.write_u16(42)?;
        writer.write_u32(layout::IFD_OFFSET)?;

        Ok(TiffEncoder { writer })
    }

    /// Write the directory and pixel strip for `image`.
    ///
    /// Consumes the encoder: the fixed layout holds exactly one image per
    /// file. The underlying stream is flushed before returning.
    pub fn write_image(mut self, image: &PixelBuffer) -> TiffResult<()> {
        let (entries, rationals) = build_directory(image.width(), image.height())?;

        self.writer.write_u16(layout::ENTRY_COUNT)?;
        for entry in &entries {
            entry.write(&mut self.writer)?;
        }
        // Overflow payloads follow the entry table, in declaration order.
        for rational in &rationals {
            self.writer.write_u32(rational.n)?;
            self.writer.write_u32(rational.d)?;
        }
        debug_assert_eq!(self.writer.offset(), u64::from(layout::STRIP_OFFSET));

        for &sample in image.samples() {
            self.writer.write_u16(sample)?;
        }
        self.writer.flush()?;

        Ok(())
    }
}

/// Encode into a freshly allocated buffer of exactly the final size.
pub fn encode_to_vec(image: &PixelBuffer) -> TiffResult<Vec<u8>> {
    let len = crate::encoded_len(image.width(), image.height());
    let mut out = Vec::with_capacity(len as usize);
    TiffEncoder::new(&mut out)?.write_image(image)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_entry_is_padded() {
        let entry = TagEntry::short(Tag::BitsPerSample, 16);
        let mut buf = Vec::new();
        entry.write(&mut TiffWriter::new(&mut buf)).unwrap();
        assert_eq!(
            buf,
            [
                0x02, 0x01, // tag 258
                0x03, 0x00, // SHORT
                0x01, 0x00, 0x00, 0x00, // count
                0x10, 0x00, 0x00, 0x00, // 16, padded
            ]
        );
    }

    #[test]
    fn long_entry_fills_the_slot() {
        let entry = TagEntry::long(Tag::StripByteCounts, 0xDEAD_BEEF);
        let mut buf = Vec::new();
        entry.write(&mut TiffWriter::new(&mut buf)).unwrap();
        assert_eq!(buf.len(), 12);
        assert_eq!(&buf[8..], [0xEF, 0xBE, 0xAD, 0xDE]);
    }

    #[test]
    fn directory_is_ascending_and_consistent() {
        let (entries, rationals) = build_directory(640, 480).unwrap();
        assert_eq!(entries.len(), 13);

        let ids: Vec<u16> = entries.iter().map(|e| e.tag.to_u16()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);

        assert_eq!(rationals, [Rational { n: 72, d: 1 }; 2]);
    }

    #[test]
    fn oversized_dimensions_rejected() {
        assert!(matches!(
            build_directory(70_000, 1),
            Err(TiffError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            build_directory(1, 70_000),
            Err(TiffError::InvalidGeometry { .. })
        ));
        assert!(build_directory(u32::from(u16::MAX), 1).is_ok());
    }
}
