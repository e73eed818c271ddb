//! Whole-image conversions using [`imgref`] types.
//!
//! Strided `ImgRef`s are converted straight from their rows; padding
//! between rows is never read.
//!
//! ```rust
//! use rgb::{Bgr, Bgra};
//! use ::imgref::ImgVec;
//! use rawbitmap::img;
//!
//! let src = ImgVec::new(vec![Bgra { b: 10u8, g: 20, r: 30, a: 255 }; 6], 3, 2);
//! let raw = img::convert_bgra_img(src.as_ref()).unwrap();
//! let out: ImgVec<Bgr<u8>> = img::to_bgr_imgvec(&raw).unwrap();
//! assert_eq!(out.width(), 3);
//! ```

use imgref::{ImgRef, ImgVec};
use rgb::{Bgr, Bgra};

use crate::{BitmapError, PixelFormat, RawBitmap, SourceBitmap};

fn source_from_img<'a, P: bytemuck::Pod>(
    img: ImgRef<'a, P>,
    format: PixelFormat,
) -> Result<SourceBitmap<'a>, BitmapError> {
    debug_assert_eq!(size_of::<P>(), format.bytes_per_pixel());
    let (w, h) = (img.width(), img.height());
    let stride = img
        .stride()
        .checked_mul(size_of::<P>())
        .ok_or(BitmapError::InvalidDimension)?;
    let bytes: &'a [u8] = bytemuck::cast_slice(img.into_buf());
    SourceBitmap::from_dims(bytes, w, h, stride, format)
}

/// Convert a BGRA image to a packed Bgr24 bitmap, compositing onto black.
pub fn convert_bgra_img(img: ImgRef<'_, Bgra<u8>>) -> Result<RawBitmap, BitmapError> {
    source_from_img(img, PixelFormat::Bgra32)?.to_bgr24()
}

/// Convert a BGR image to a packed Bgr24 bitmap, dropping any row padding.
pub fn convert_bgr_img(img: ImgRef<'_, Bgr<u8>>) -> Result<RawBitmap, BitmapError> {
    source_from_img(img, PixelFormat::Bgr24)?.to_bgr24()
}

/// Copy a Bgr24 bitmap into an `ImgVec`. `None` for any other format.
pub fn to_bgr_imgvec(raw: &RawBitmap) -> Option<ImgVec<Bgr<u8>>> {
    raw.to_bgr_pixels()
        .map(|pixels| ImgVec::new(pixels, raw.width(), raw.height()))
}
