// ---------------------------------------------------------------------------
// Conversion driver: resolve the transformation, allocate the packed target,
// walk the source in raster order.
// ---------------------------------------------------------------------------

use crate::registry::{self, Registry, Transformation};
use crate::{BitmapError, PixelFormat, RawBitmap, SourceBitmap};

/// Convert `source` to a packed bitmap in `target` format, using the
/// process-wide registry.
///
/// # Errors
///
/// [`BitmapError::UnsupportedConversion`] if no transformation is registered
/// for `(source.format(), target)`. No buffer is allocated in that case.
pub fn convert(source: &SourceBitmap<'_>, target: PixelFormat) -> Result<RawBitmap, BitmapError> {
    registry::global().convert(source, target)
}

/// Validate raw locked-bitmap metrics and convert in one step.
///
/// Equivalent to [`SourceBitmap::new`] followed by [`convert`].
pub fn convert_bytes(
    bytes: &[u8],
    width: i32,
    height: i32,
    stride: i32,
    source_format: PixelFormat,
    target_format: PixelFormat,
) -> Result<RawBitmap, BitmapError> {
    let source = SourceBitmap::new(bytes, width, height, stride, source_format)?;
    convert(&source, target_format)
}

impl Registry {
    /// Convert `source` to a packed bitmap in `target` format using this
    /// registry.
    pub fn convert(
        &self,
        source: &SourceBitmap<'_>,
        target: PixelFormat,
    ) -> Result<RawBitmap, BitmapError> {
        let transformation = self.resolve(source.format(), target)?;
        run(source, target, transformation)
    }
}

fn run(
    source: &SourceBitmap<'_>,
    target: PixelFormat,
    transformation: Transformation,
) -> Result<RawBitmap, BitmapError> {
    let (w, h) = (source.width(), source.height());
    let src_bpp = source.format().bytes_per_pixel();
    let dst_bpp = target.bytes_per_pixel();
    let src_stride = source.stride();
    let dst_stride = w.checked_mul(dst_bpp).ok_or(BitmapError::InvalidDimension)?;

    let mut out = RawBitmap::zeroed(w, h, dst_stride, target)?;
    let src = source.data();
    let dst = out.data_mut();

    match transformation.row() {
        Some(row) => {
            log::trace!("{} -> {target} {w}x{h}: row kernel", source.format());
            for y in 0..h {
                row(
                    &src[y * src_stride..][..w * src_bpp],
                    &mut dst[y * dst_stride..][..dst_stride],
                );
            }
        }
        None => {
            log::trace!("{} -> {target} {w}x{h}: per pixel", source.format());
            let pixel = transformation.pixel();
            for y in 0..h {
                let src_row = &src[y * src_stride..][..w * src_bpp];
                let dst_row = &mut dst[y * dst_stride..][..dst_stride];
                for (s, d) in src_row
                    .chunks_exact(src_bpp)
                    .zip(dst_row.chunks_exact_mut(dst_bpp))
                {
                    pixel(s, d);
                }
            }
        }
    }
    Ok(out)
}
