use core::fmt;

use crate::PixelFormat;

/// Errors from bitmap construction, lookup and conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum BitmapError {
    /// Width, height or stride is negative, or the byte size overflows.
    InvalidDimension,
    /// Stride is smaller than `width * bytes_per_pixel`.
    StrideTooSmall,
    /// Source slice is shorter than its declared layout requires.
    InsufficientData,
    /// Byte index is past the end of the buffer.
    IndexOutOfRange { index: usize, len: usize },
    /// No transformation is registered for this exact format pair.
    UnsupportedConversion {
        source: PixelFormat,
        target: PixelFormat,
    },
    /// Buffer is empty or its length is not a multiple of the pixel size.
    NotPixelAligned,
    /// Destination holds fewer pixels than the source.
    PixelCountMismatch,
}

impl fmt::Display for BitmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension => {
                write!(f, "width, height or stride is negative or overflows")
            }
            Self::StrideTooSmall => write!(f, "stride is smaller than width * bytes_per_pixel"),
            Self::InsufficientData => {
                write!(f, "data slice is too small for the given dimensions")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "byte index {index} out of range for length {len}")
            }
            Self::UnsupportedConversion { source, target } => {
                write!(f, "no transformation registered from {source} to {target}")
            }
            Self::NotPixelAligned => {
                write!(f, "buffer is empty or not a multiple of the pixel size")
            }
            Self::PixelCountMismatch => write!(f, "destination is smaller than the source"),
        }
    }
}

impl core::error::Error for BitmapError {}
