//! # rawbitmap
//!
//! Turn locked bitmap memory into an immutable raw buffer in the pixel
//! layout a device wants.
//!
//! An image loader locks its native bitmap, hands over the pixel bytes with
//! their width, height, stride and [`PixelFormat`], and gets back a
//! [`RawBitmap`] in the target layout. Row padding on either side is
//! absorbed by the conversion; the output is always tightly packed.
//!
//! ```rust
//! use rawbitmap::{PixelFormat, SourceBitmap};
//!
//! // 2×1 BGRA, half-transparent blue then opaque green.
//! let bgra = [255u8, 0, 0, 128, 0, 255, 0, 255];
//! let src = SourceBitmap::new(&bgra, 2, 1, 8, PixelFormat::Bgra32).unwrap();
//! let raw = src.to_bgr24().unwrap();
//! assert_eq!(raw.as_bytes(), &[128, 0, 0, 0, 255, 0]);
//! ```
//!
//! ## Conversions
//!
//! Which conversions exist is decided by a [`Registry`] keyed on
//! (source, target) format pairs. The process-wide registry starts with:
//!
//! - `Bgr24 → Bgr24`: identity copy (restrides the rows).
//! - `Bgra32 → Bgr24`: composites each pixel onto opaque black.
//!
//! More pairs can be added at runtime with [`register`].
//!
//! ## Row-level operations
//!
//! The compositing kernel is also exported at row granularity on raw
//! `&[u8]` / `&mut [u8]` slices, with x86-64 AVX2 dispatch and a scalar
//! fallback.
//!
//! ## Feature flags
//!
//! - **`rgb`**: build sources from [`rgb`] pixel slices (`Bgr<u8>`,
//!   `Bgra<u8>`) via bytemuck.
//! - **`imgref`**: convert whole [`imgref`] images. Implies `rgb`.

#![forbid(unsafe_code)]

mod bitmap;
mod convert;
mod error;
mod format;
pub mod registry;
mod transform;

pub use bitmap::{RawBitmap, SourceBitmap};
pub use convert::{convert, convert_bytes};
pub use error::BitmapError;
pub use format::PixelFormat;
pub use registry::{Registry, Transformation, register, resolve};
pub use transform::*;

#[cfg(feature = "rgb")]
pub mod typed;

#[cfg(feature = "imgref")]
pub mod img;
