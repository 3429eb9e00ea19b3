use std::error::Error;
use std::fmt;
use std::io;

/// Tiff error kinds.
#[derive(Debug)]
pub enum TiffError {
    /// The stream does not begin with a little-endian TIFF header
    NotATiffFile,

    /// A directory entry declared a type code outside the known set
    UnsupportedTagType(u16),

    /// The directory is missing a mandatory tag or its entries contradict
    /// each other
    MalformedDirectory(String),

    /// The stream ended before the data the header declared
    TruncatedFile,

    /// The image geometry is empty or cannot be represented in the fixed
    /// directory layout
    InvalidGeometry { width: u32, height: u32 },

    /// The declared strip is larger than the decoder is willing to allocate
    LimitsExceeded,

    /// An I/O error occurred while encoding or decoding the image
    IoError(io::Error),
}

impl fmt::Display for TiffError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TiffError::NotATiffFile => write!(fmt, "Stream is not a little-endian TIFF file"),
            TiffError::UnsupportedTagType(ty) => {
                write!(fmt, "Directory entry has unsupported type code `{}`", ty)
            }
            TiffError::MalformedDirectory(ref e) => write!(fmt, "Malformed directory: {}", e),
            TiffError::TruncatedFile => write!(fmt, "Stream ended before the declared data"),
            TiffError::InvalidGeometry { width, height } => {
                write!(fmt, "Invalid image geometry {}x{}", width, height)
            }
            TiffError::LimitsExceeded => write!(fmt, "Decoding limits exceeded"),
            TiffError::IoError(ref e) => e.fmt(fmt),
        }
    }
}

impl Error for TiffError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            TiffError::IoError(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TiffError {
    fn from(err: io::Error) -> TiffError {
        // A short read anywhere means the file stopped before the data its
        // header promised.
        if err.kind() == io::ErrorKind::UnexpectedEof {
            TiffError::TruncatedFile
        } else {
            TiffError::IoError(err)
        }
    }
}

/// Result of an image decoding/encoding process
pub type TiffResult<T> = Result<T, TiffError>;
