use archmage::prelude::*;
use core::arch::x86_64::__m256i;
use safe_unaligned_simd::x86_64::{_mm256_loadu_si256, _mm256_storeu_si256};

use super::composite_bgra32_to_bgr24;

// ===========================================================================
// SIMD constants
// ===========================================================================

// Keep bytes 0,1,2 of each 4-byte pixel (4 pixels → 12 bytes per lane)
const BGRA_TO_BGR_SHUF_AVX: [i8; 32] = [
    0, 1, 2, 4, 5, 6, 8, 9, 10, 12, 13, 14, -128, -128, -128, -128, 0, 1, 2, 4, 5, 6, 8, 9, 10, 12,
    13, 14, -128, -128, -128, -128,
];

// Pack permutation: merge 12 bytes from each 16-byte lane into contiguous 24 bytes
const PACK_3X4_PERM_AVX: [i8; 32] = [
    0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 4, 0, 0, 0, 5, 0, 0, 0, 6, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

// ===========================================================================
// x86-64 AVX2: rite row implementations
// ===========================================================================

// Two pixels per lane as u16 [b g r a b g r a]. Broadcast each alpha over its
// pixel, multiply, then divide by 255 with rounding: t = c*a + 128,
// (t + (t >> 8)) >> 8. Exact for every 8-bit c and a.
#[rite]
fn premultiply_u16_v3(_token: X64V3Token, px: __m256i, bias: __m256i) -> __m256i {
    let alpha = _mm256_shufflehi_epi16::<0xFF>(_mm256_shufflelo_epi16::<0xFF>(px));
    let t = _mm256_add_epi16(_mm256_mullo_epi16(px, alpha), bias);
    _mm256_srli_epi16::<8>(_mm256_add_epi16(t, _mm256_srli_epi16::<8>(t)))
}

// 4→3 composite onto black: widen, premultiply, narrow, then pshufb + vpermd pack
#[rite]
pub(super) fn composite_row_v3(token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let shuf = _mm256_loadu_si256(&BGRA_TO_BGR_SHUF_AVX);
    let pack = _mm256_loadu_si256(&PACK_3X4_PERM_AVX);
    let zero = _mm256_setzero_si256();
    let bias = _mm256_set1_epi16(128);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 32 <= slen && id + 24 <= dlen {
        let s: &[u8; 32] = src[is..is + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(s);
        let lo = premultiply_u16_v3(token, _mm256_unpacklo_epi8(v, zero), bias);
        let hi = premultiply_u16_v3(token, _mm256_unpackhi_epi8(v, zero), bias);
        let blended = _mm256_packus_epi16(lo, hi);
        let stripped = _mm256_shuffle_epi8(blended, shuf);
        let packed = _mm256_permutevar8x32_epi32(stripped, pack);
        let mut tmp = [0u8; 32];
        _mm256_storeu_si256(&mut tmp, packed);
        dst[id..id + 24].copy_from_slice(&tmp[..24]);
        is += 32;
        id += 24;
    }
    for (s, d) in src[is..].chunks_exact(4).zip(dst[id..].chunks_exact_mut(3)) {
        composite_bgra32_to_bgr24(s, d);
    }
}

// ===========================================================================
// x86-64 arcane wrappers
// ===========================================================================

#[arcane]
pub(super) fn composite_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    composite_row_v3(t, s, d);
}

#[arcane]
pub(super) fn composite_strided_v3(
    t: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        composite_row_v3(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 3]);
    }
}
