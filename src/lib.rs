//! Encoding and decoding of single-strip 16-bit grayscale TIFF images.
//!
//! The files this crate writes use one fixed little-endian layout: an
//! 8-byte header, a thirteen-entry image file directory with the two
//! resolution rationals stored out of line, and a single uncompressed
//! pixel strip. The decoder reads back exactly that subset, so buffers
//! round-trip without an external codec.
//!
//! ```
//! use tiff16::{decoder::Decoder, encoder::encode_to_vec, PixelBuffer};
//!
//! let image = PixelBuffer::new(2, 2, vec![0, 65535, 32768, 1]).unwrap();
//! let bytes = encode_to_vec(&image).unwrap();
//! assert_eq!(bytes.len() as u64, tiff16::encoded_len(2, 2));
//!
//! let mut decoder = Decoder::new(std::io::Cursor::new(bytes)).unwrap();
//! assert_eq!(decoder.read_image().unwrap(), image);
//! ```
//!
//! # Related Links
//! * <https://web.archive.org/web/20210108073850/https://www.adobe.io/open/standards/TIFF.html> - The TIFF specification

pub mod decoder;
pub mod encoder;
mod error;
mod layout;
pub mod tags;

use std::fs;
use std::io::Cursor;
use std::path::Path;

pub use self::error::{TiffError, TiffResult};
pub use self::layout::encoded_len;

/// Type to represent tiff values of type `RATIONAL`
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rational {
    pub n: u32,
    pub d: u32,
}

/// A rectangular grid of 16-bit grayscale samples, row-major with the
/// origin at the top left.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u16>,
}

impl PixelBuffer {
    /// Create a buffer, checking that neither dimension is zero and that
    /// `samples` holds exactly `width * height` values.
    pub fn new(width: u32, height: u32, samples: Vec<u16>) -> TiffResult<PixelBuffer> {
        let expected = u64::from(width) * u64::from(height);
        if width == 0 || height == 0 || samples.len() as u64 != expected {
            return Err(TiffError::InvalidGeometry { width, height });
        }
        Ok(PixelBuffer {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The samples in row-major order, left to right, top to bottom.
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }
}

/// Read a file written by [`save`], or by any encoder of the same
/// baseline grayscale subset.
pub fn open<P: AsRef<Path>>(path: P) -> TiffResult<PixelBuffer> {
    let bytes = fs::read(path)?;
    decoder::Decoder::new(Cursor::new(bytes))?.read_image()
}

/// Encode `image` and write it to `path`.
///
/// The file is encoded into memory first, so a failed encode leaves the
/// destination untouched.
pub fn save<P: AsRef<Path>>(image: &PixelBuffer, path: P) -> TiffResult<()> {
    let bytes = encoder::encode_to_vec(image)?;
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_buffer_checks_sample_count() {
        assert!(PixelBuffer::new(2, 2, vec![0; 4]).is_ok());
        assert!(matches!(
            PixelBuffer::new(2, 2, vec![0; 3]),
            Err(TiffError::InvalidGeometry {
                width: 2,
                height: 2
            })
        ));
        assert!(matches!(
            PixelBuffer::new(0, 1, vec![]),
            Err(TiffError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            PixelBuffer::new(1, 0, vec![]),
            Err(TiffError::InvalidGeometry { .. })
        ));
    }
}
