//! Byte layout of the fixed single-strip directory.
//!
//! Every offset in an encoded file derives from the constants here. Adding
//! a tag to the layout means updating `ENTRY_COUNT` and the builder in
//! `encoder`; no call site does its own offset arithmetic.

/// Byte-order marker, magic and IFD pointer.
pub(crate) const HEADER_BYTES: u32 = 8;
/// The directory immediately follows the header.
pub(crate) const IFD_OFFSET: u32 = HEADER_BYTES;

/// Number of entries in the fixed directory.
pub(crate) const ENTRY_COUNT: u16 = 13;
/// Size of one 12-byte directory record.
pub(crate) const ENTRY_BYTES: u32 = 12;

/// Rational payloads stored out of line (X and Y resolution).
pub(crate) const RATIONAL_COUNT: u32 = 2;
pub(crate) const RATIONAL_BYTES: u32 = 8;

/// First byte of the out-of-line rational region.
pub(crate) const OVERFLOW_OFFSET: u32 = IFD_OFFSET + 2 + ENTRY_COUNT as u32 * ENTRY_BYTES;
/// First byte of the pixel strip.
pub(crate) const STRIP_OFFSET: u32 = OVERFLOW_OFFSET + RATIONAL_COUNT * RATIONAL_BYTES;

// Fixed policy values of the grayscale layout.
pub(crate) const BITS_PER_SAMPLE: u16 = 16;
pub(crate) const BYTES_PER_SAMPLE: u32 = 2;
pub(crate) const COMPRESSION_NONE: u16 = 1;
pub(crate) const BLACK_IS_ZERO: u16 = 1;
pub(crate) const SAMPLES_PER_PIXEL: u16 = 1;
pub(crate) const RESOLUTION_UNIT_INCH: u16 = 2;
pub(crate) const RESOLUTION_DPI: u32 = 72;

/// Exact byte length of the file encoded for a `width` x `height` image.
///
/// Encoding is deterministic, so this can be used to preallocate buffers
/// or to validate a file's size up front.
pub fn encoded_len(width: u32, height: u32) -> u64 {
    u64::from(STRIP_OFFSET) + u64::from(BYTES_PER_SAMPLE) * u64::from(width) * u64::from(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_offsets() {
        assert_eq!(OVERFLOW_OFFSET, 166);
        assert_eq!(STRIP_OFFSET, 182);
    }

    #[test]
    fn size_law() {
        assert_eq!(encoded_len(1, 1), 184);
        assert_eq!(encoded_len(2, 2), 190);
        assert_eq!(encoded_len(4096, 4096), 182 + 2 * 4096 * 4096);
    }
}
