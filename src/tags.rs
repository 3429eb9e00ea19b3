//! Tag identifiers and entry types used by the fixed directory layout.

/// TIFF tags written and recognized by this crate.
///
/// This is the baseline grayscale subset; entries with other IDs are
/// tolerated during decoding but never consulted.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u16)]
pub enum Tag {
    NewSubfileType = 254,
    ImageWidth = 256,
    ImageLength = 257,
    BitsPerSample = 258,
    Compression = 259,
    PhotometricInterpretation = 262,
    StripOffsets = 273,
    SamplesPerPixel = 277,
    RowsPerStrip = 278,
    StripByteCounts = 279,
    XResolution = 282,
    YResolution = 283,
    ResolutionUnit = 296,
}

impl Tag {
    pub const fn from_u16(val: u16) -> Option<Self> {
        match val {
            254 => Some(Tag::NewSubfileType),
            256 => Some(Tag::ImageWidth),
            257 => Some(Tag::ImageLength),
            258 => Some(Tag::BitsPerSample),
            259 => Some(Tag::Compression),
            262 => Some(Tag::PhotometricInterpretation),
            273 => Some(Tag::StripOffsets),
            277 => Some(Tag::SamplesPerPixel),
            278 => Some(Tag::RowsPerStrip),
            279 => Some(Tag::StripByteCounts),
            282 => Some(Tag::XResolution),
            283 => Some(Tag::YResolution),
            296 => Some(Tag::ResolutionUnit),
            _ => None,
        }
    }

    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}

/// The type of an IFD entry (a 2 byte field).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u16)]
pub enum Type {
    /// 8-bit unsigned integer
    BYTE = 1,
    /// 8-bit byte that contains a 7-bit ASCII code; the last byte must be zero
    ASCII = 2,
    /// 16-bit unsigned integer
    SHORT = 3,
    /// 32-bit unsigned integer
    LONG = 4,
    /// Fraction stored as two 32-bit unsigned integers
    RATIONAL = 5,
}

impl Type {
    pub const fn from_u16(val: u16) -> Option<Self> {
        match val {
            1 => Some(Type::BYTE),
            2 => Some(Type::ASCII),
            3 => Some(Type::SHORT),
            4 => Some(Type::LONG),
            5 => Some(Type::RATIONAL),
            _ => None,
        }
    }

    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for val in 0..=u16::MAX {
            if let Some(tag) = Tag::from_u16(val) {
                assert_eq!(tag.to_u16(), val);
            }
        }
    }

    #[test]
    fn type_codes() {
        assert_eq!(Type::SHORT.to_u16(), 3);
        assert_eq!(Type::LONG.to_u16(), 4);
        assert_eq!(Type::RATIONAL.to_u16(), 5);
        assert_eq!(Type::from_u16(0), None);
        assert_eq!(Type::from_u16(6), None);
    }
}
