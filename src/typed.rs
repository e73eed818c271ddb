//! Conversion sources built from [`rgb`] pixel slices via bytemuck.
//!
//! ```rust
//! use rgb::Bgra;
//! use rawbitmap::typed;
//!
//! let pixels = vec![Bgra { b: 255u8, g: 0, r: 0, a: 128 }; 4];
//! let raw = typed::source_from_bgra(&pixels, 2, 2).unwrap().to_bgr24().unwrap();
//! assert_eq!(raw.to_bgr_pixels().unwrap()[0].b, 128);
//! ```

use rgb::{Bgr, Bgra};

use crate::{BitmapError, PixelFormat, RawBitmap, SourceBitmap};

/// View tightly packed `Bgra<u8>` pixels as a [`PixelFormat::Bgra32`] source.
pub fn source_from_bgra(
    pixels: &[Bgra<u8>],
    width: usize,
    height: usize,
) -> Result<SourceBitmap<'_>, BitmapError> {
    SourceBitmap::packed(bytemuck::cast_slice(pixels), width, height, PixelFormat::Bgra32)
}

/// View tightly packed `Bgr<u8>` pixels as a [`PixelFormat::Bgr24`] source.
pub fn source_from_bgr(
    pixels: &[Bgr<u8>],
    width: usize,
    height: usize,
) -> Result<SourceBitmap<'_>, BitmapError> {
    SourceBitmap::packed(bytemuck::cast_slice(pixels), width, height, PixelFormat::Bgr24)
}

impl RawBitmap {
    /// Copy out the pixels as `Bgr<u8>`, row padding removed.
    ///
    /// `None` unless the bitmap is [`PixelFormat::Bgr24`].
    pub fn to_bgr_pixels(&self) -> Option<Vec<Bgr<u8>>> {
        if self.format() != PixelFormat::Bgr24 {
            return None;
        }
        let pixels = (0..self.height())
            .filter_map(|y| self.row(y))
            .flat_map(|row| bytemuck::cast_slice::<u8, Bgr<u8>>(row).iter().copied())
            .collect();
        Some(pixels)
    }
}
