// ---------------------------------------------------------------------------
// Built-in transformations: per-pixel routines plus row kernels with SIMD
// dispatch.
//
// Architecture: #[rite] row functions contain the SIMD loops.
// #[arcane] wrappers dispatch via incant!: contiguous (single call)
// and strided (loop over rows, single dispatch).
// ---------------------------------------------------------------------------

use crate::BitmapError;
use archmage::incant;

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(test)]
mod tests;

// ===========================================================================
// Validation helpers
// ===========================================================================

#[inline]
fn check_copy(
    src_len: usize,
    src_bpp: usize,
    dst_len: usize,
    dst_bpp: usize,
) -> Result<(), BitmapError> {
    if src_len == 0 || !src_len.is_multiple_of(src_bpp) {
        return Err(BitmapError::NotPixelAligned);
    }
    if dst_len < (src_len / src_bpp) * dst_bpp {
        return Err(BitmapError::PixelCountMismatch);
    }
    Ok(())
}

#[inline]
fn check_strided(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    bpp: usize,
) -> Result<(), BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidDimension);
    }
    let row_bytes = width
        .checked_mul(bpp)
        .ok_or(BitmapError::InvalidDimension)?;
    if row_bytes > stride {
        return Err(BitmapError::StrideTooSmall);
    }
    let total = (height - 1)
        .checked_mul(stride)
        .ok_or(BitmapError::InvalidDimension)?
        .checked_add(row_bytes)
        .ok_or(BitmapError::InvalidDimension)?;
    if len < total {
        return Err(BitmapError::InsufficientData);
    }
    Ok(())
}

// ===========================================================================
// Utility
// ===========================================================================

/// `round(c * a / 255)`.
///
/// `c * a / 255` is never exactly halfway between two integers for 8-bit
/// inputs, so this agrees with every rounding mode.
#[inline(always)]
fn mul_div255(c: u8, a: u8) -> u8 {
    ((c as u32 * a as u32 + 127) / 255) as u8
}

// ===========================================================================
// Per-pixel routines
// ===========================================================================

/// Bgr24 → Bgr24: copy the three channel bytes.
///
/// `src` and `dst` are single-pixel windows.
#[inline]
pub fn identity_bgr24(src: &[u8], dst: &mut [u8]) {
    dst[..3].copy_from_slice(&src[..3]);
}

/// Bgra32 → Bgr24: composite onto opaque black.
///
/// Each of B, G, R becomes `round(channel * alpha / 255)`. Alpha 255 keeps
/// the colour, alpha 0 gives black.
#[inline]
pub fn composite_bgra32_to_bgr24(src: &[u8], dst: &mut [u8]) {
    let a = src[3];
    dst[0] = mul_div255(src[0], a);
    dst[1] = mul_div255(src[1], a);
    dst[2] = mul_div255(src[2], a);
}

// ===========================================================================
// Row kernels (registry entries)
// ===========================================================================

pub(crate) fn identity_bgr24_row(src: &[u8], dst: &mut [u8]) {
    dst.copy_from_slice(src);
}

pub(crate) fn composite_bgra32_to_bgr24_row(src: &[u8], dst: &mut [u8]) {
    incant!(composite_impl(src, dst), [v3, scalar]);
}

// ===========================================================================
// Public API: row level
// ===========================================================================

/// BGRA (4 bytes/px) → BGR (3 bytes/px), compositing onto black.
///
/// Works for RGBA → RGB as well; only byte 3 is treated specially.
pub fn bgra_to_bgr_composite(src: &[u8], dst: &mut [u8]) -> Result<(), BitmapError> {
    check_copy(src.len(), 4, dst.len(), 3)?;
    incant!(composite_impl(src, dst), [v3, scalar]);
    Ok(())
}

/// BGRA (4 bytes/px) → BGR (3 bytes/px) between strided buffers,
/// compositing onto black.
///
/// `src_stride` / `dst_stride` are the distances in bytes between the start of
/// consecutive rows. Padding bytes between rows are never read or written.
pub fn bgra_to_bgr_composite_strided(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), BitmapError> {
    check_strided(src.len(), width, height, src_stride, 4)?;
    check_strided(dst.len(), width, height, dst_stride, 3)?;
    incant!(
        composite_strided(src, dst, width, height, src_stride, dst_stride),
        [v3, scalar]
    );
    Ok(())
}
