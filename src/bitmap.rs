// ---------------------------------------------------------------------------
// Raw bitmap buffers: the owned immutable output and the borrowed input view.
// ---------------------------------------------------------------------------

use crate::{BitmapError, PixelFormat};

#[inline]
fn dimension(v: i32) -> Result<usize, BitmapError> {
    usize::try_from(v).map_err(|_| BitmapError::InvalidDimension)
}

#[inline]
fn row_bytes(width: usize, format: PixelFormat) -> Result<usize, BitmapError> {
    width
        .checked_mul(format.bytes_per_pixel())
        .ok_or(BitmapError::InvalidDimension)
}

// ===========================================================================
// RawBitmap
// ===========================================================================

/// Immutable raw pixel data in a given format.
///
/// Produced by a conversion; the bytes cannot be changed once the buffer is
/// handed out. `len() == stride() * height()` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawBitmap {
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
    data: Box<[u8]>,
}

impl RawBitmap {
    /// Create a zero-filled bitmap.
    ///
    /// Metrics are signed to match what native bitmap locks report.
    ///
    /// # Errors
    ///
    /// [`BitmapError::InvalidDimension`] if any metric is negative or
    /// `stride * height` overflows, [`BitmapError::StrideTooSmall`] if
    /// `stride < width * format.bytes_per_pixel()`.
    pub fn new(
        width: i32,
        height: i32,
        stride: i32,
        format: PixelFormat,
    ) -> Result<Self, BitmapError> {
        Self::zeroed(dimension(width)?, dimension(height)?, dimension(stride)?, format)
    }

    pub(crate) fn zeroed(
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, BitmapError> {
        if stride < row_bytes(width, format)? {
            return Err(BitmapError::StrideTooSmall);
        }
        let len = stride
            .checked_mul(height)
            .ok_or(BitmapError::InvalidDimension)?;
        Ok(Self {
            width,
            height,
            stride,
            format,
            data: vec![0u8; len].into_boxed_slice(),
        })
    }

    /// Only the conversion driver writes, and only before returning `self`.
    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Total byte length (`stride * height`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Read one byte.
    ///
    /// # Errors
    ///
    /// [`BitmapError::IndexOutOfRange`] if `index >= len()`.
    pub fn byte_at(&self, index: usize) -> Result<u8, BitmapError> {
        self.data
            .get(index)
            .copied()
            .ok_or(BitmapError::IndexOutOfRange {
                index,
                len: self.data.len(),
            })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixel bytes of row `y`, without trailing padding.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        Some(&self.data[start..start + self.width * self.format.bytes_per_pixel()])
    }

    pub fn into_boxed_bytes(self) -> Box<[u8]> {
        self.data
    }
}

impl AsRef<[u8]> for RawBitmap {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

// ===========================================================================
// SourceBitmap
// ===========================================================================

/// Borrowed, read-only view of pixel memory to convert from.
///
/// This is what an image loader fills in while it holds its native bitmap
/// locked. The view must not outlive that lock, which the borrow enforces.
#[derive(Clone, Copy, Debug)]
pub struct SourceBitmap<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> SourceBitmap<'a> {
    /// Wrap locked pixel memory.
    ///
    /// The final row does not need trailing padding: `data` must hold at
    /// least `(height - 1) * stride + width * bytes_per_pixel` bytes.
    ///
    /// # Errors
    ///
    /// [`BitmapError::InvalidDimension`] for negative metrics,
    /// [`BitmapError::StrideTooSmall`] if a row does not fit in `stride`,
    /// [`BitmapError::InsufficientData`] if `data` is too short.
    pub fn new(
        data: &'a [u8],
        width: i32,
        height: i32,
        stride: i32,
        format: PixelFormat,
    ) -> Result<Self, BitmapError> {
        Self::from_dims(data, dimension(width)?, dimension(height)?, dimension(stride)?, format)
    }

    /// Wrap tightly packed rows (`stride == width * bytes_per_pixel`).
    pub fn packed(
        data: &'a [u8],
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> Result<Self, BitmapError> {
        Self::from_dims(data, width, height, row_bytes(width, format)?, format)
    }

    pub(crate) fn from_dims(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, BitmapError> {
        let row = row_bytes(width, format)?;
        if row > stride {
            return Err(BitmapError::StrideTooSmall);
        }
        if height > 0 {
            let required = (height - 1)
                .checked_mul(stride)
                .and_then(|n| n.checked_add(row))
                .ok_or(BitmapError::InvalidDimension)?;
            if data.len() < required {
                return Err(BitmapError::InsufficientData);
            }
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Convert to packed [`PixelFormat::Bgr24`] using the global registry.
    pub fn to_bgr24(&self) -> Result<RawBitmap, BitmapError> {
        crate::convert(self, PixelFormat::Bgr24)
    }
}
