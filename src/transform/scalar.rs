use archmage::prelude::*;

use super::composite_bgra32_to_bgr24;

// ===========================================================================
// Scalar row implementations
// ===========================================================================

pub(super) fn composite_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        composite_bgra32_to_bgr24(s, d);
    }
}

// ===========================================================================
// Scalar wrappers (dispatch targets for incant!)
// ===========================================================================

pub(super) fn composite_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    composite_row_scalar(t, s, d);
}

pub(super) fn composite_strided_scalar(
    t: ScalarToken,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        composite_row_scalar(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 3]);
    }
}
