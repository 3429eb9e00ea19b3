//! Function for reading TIFF tags

use std::collections::BTreeMap;
use std::io::Read;

use super::stream::SmartReader;
use crate::error::{TiffError, TiffResult};
use crate::tags::{Tag, Type};

/// One decoded 12-byte directory record.
///
/// The 4-byte value slot is kept raw; accessors interpret it against the
/// declared type. For `RATIONAL` entries the slot holds the absolute file
/// offset of the 8-byte numerator/denominator payload.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Entry {
    type_: Type,
    count: u32,
    value: [u8; 4],
}

impl Entry {
    pub(crate) fn new(type_: Type, count: u32, value: [u8; 4]) -> Entry {
        Entry {
            type_,
            count,
            value,
        }
    }

    pub fn field_type(&self) -> Type {
        self.type_
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Inline unsigned value of a single-count SHORT or LONG entry.
    ///
    /// Any other declared type contradicts the caller's expectation of an
    /// inline integer and is rejected.
    pub fn as_unsigned(&self) -> TiffResult<u32> {
        if self.count != 1 {
            return Err(TiffError::MalformedDirectory(format!(
                "expected a single value, entry declares {}",
                self.count
            )));
        }
        match self.type_ {
            Type::SHORT => Ok(u32::from(u16::from_le_bytes([self.value[0], self.value[1]]))),
            Type::LONG => Ok(u32::from_le_bytes(self.value)),
            other => Err(TiffError::MalformedDirectory(format!(
                "expected an inline integer, entry has type {:?}",
                other
            ))),
        }
    }

    /// Absolute offset of an out-of-line RATIONAL payload.
    pub fn as_rational_offset(&self) -> TiffResult<u32> {
        if self.type_ != Type::RATIONAL || self.count != 1 {
            return Err(TiffError::MalformedDirectory(format!(
                "expected a single rational, entry has type {:?} with count {}",
                self.type_, self.count
            )));
        }
        Ok(u32::from_le_bytes(self.value))
    }
}

/// A parsed Image File Directory.
///
/// Entries are keyed by numeric tag ID, so iteration is in ascending tag
/// order. Entries with IDs this crate does not know are retained but never
/// consulted.
#[derive(Clone, Default, Debug)]
pub struct Directory {
    entries: BTreeMap<u16, Entry>,
}

impl Directory {
    /// Parse the entry table at the reader's current position.
    ///
    /// A type code outside the known set fails the parse; an unknown tag
    /// ID with a well-formed type is tolerated.
    pub(crate) fn from_reader<R: Read>(reader: &mut SmartReader<R>) -> TiffResult<Directory> {
        let count = reader.read_u16()?;
        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let tag = reader.read_u16()?;
            let raw_type = reader.read_u16()?;
            let type_ =
                Type::from_u16(raw_type).ok_or(TiffError::UnsupportedTagType(raw_type))?;
            let value_count = reader.read_u32()?;
            let mut value = [0u8; 4];
            reader.read_exact(&mut value)?;
            entries.insert(tag, Entry::new(type_, value_count, value));
        }
        Ok(Directory { entries })
    }

    /// Retrieve the entry associated with a tag.
    pub fn get(&self, tag: Tag) -> Option<&Entry> {
        self.entries.get(&tag.to_u16())
    }

    /// Check if the directory contains a specified tag.
    pub fn contains(&self, tag: Tag) -> bool {
        self.entries.contains_key(&tag.to_u16())
    }

    /// Get the number of entries, known or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Entry)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Entry for a tag the fixed layout cannot do without.
    pub(crate) fn require(&self, tag: Tag) -> TiffResult<&Entry> {
        self.get(tag).ok_or_else(|| {
            TiffError::MalformedDirectory(format!("missing mandatory tag {:?}", tag))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn inline_values_follow_the_declared_type() {
        let short = Entry::new(Type::SHORT, 1, [0x10, 0x00, 0x00, 0x00]);
        assert_eq!(short.as_unsigned().unwrap(), 16);

        let long = Entry::new(Type::LONG, 1, [0xB6, 0x00, 0x00, 0x00]);
        assert_eq!(long.as_unsigned().unwrap(), 182);

        let rational = Entry::new(Type::RATIONAL, 1, [0xA6, 0x00, 0x00, 0x00]);
        assert_eq!(rational.as_rational_offset().unwrap(), 166);
        assert!(matches!(
            rational.as_unsigned(),
            Err(TiffError::MalformedDirectory(_))
        ));
        assert!(matches!(
            long.as_rational_offset(),
            Err(TiffError::MalformedDirectory(_))
        ));
    }

    #[test]
    fn multi_count_entries_are_rejected_inline() {
        let entry = Entry::new(Type::SHORT, 2, [0x01, 0x00, 0x02, 0x00]);
        assert!(matches!(
            entry.as_unsigned(),
            Err(TiffError::MalformedDirectory(_))
        ));
    }

    #[test]
    fn unknown_type_code_fails_the_parse() {
        // count = 1, one entry with type code 7
        let bytes = [
            0x01, 0x00, // entry count
            0x00, 0x01, // tag 256
            0x07, 0x00, // type 7
            0x01, 0x00, 0x00, 0x00, // count
            0x00, 0x00, 0x00, 0x00, // value
        ];
        let mut reader = SmartReader::wrap(Cursor::new(bytes));
        assert!(matches!(
            Directory::from_reader(&mut reader),
            Err(TiffError::UnsupportedTagType(7))
        ));
    }

    #[test]
    fn unknown_tag_ids_are_retained() {
        let bytes = [
            0x01, 0x00, // entry count
            0x39, 0x30, // tag 12345
            0x03, 0x00, // SHORT
            0x01, 0x00, 0x00, 0x00, // count
            0x2A, 0x00, 0x00, 0x00, // value
        ];
        let mut reader = SmartReader::wrap(Cursor::new(bytes));
        let dir = Directory::from_reader(&mut reader).unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.iter().next().unwrap().0, 12345);
        assert!(!dir.contains(Tag::ImageWidth));
    }
}
