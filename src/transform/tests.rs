use super::*;
use archmage::testing::{CompileTimePolicy, for_each_token_permutation};

fn policy() -> CompileTimePolicy {
    if std::env::var_os("CI").is_some() {
        CompileTimePolicy::Fail
    } else {
        CompileTimePolicy::WarnStderr
    }
}

// --- Helpers to generate test data ---

fn make_4bpp(n_pixels: usize) -> Vec<u8> {
    (0..n_pixels * 4).map(|i| (i * 37 % 256) as u8).collect()
}

// --- Reference implementation for comparison ---

fn ref_composite(src: &[u8]) -> Vec<u8> {
    let n = src.len() / 4;
    let mut out = vec![0u8; n * 3];
    for (s, d) in src.chunks_exact(4).zip(out.chunks_exact_mut(3)) {
        let alpha = s[3] as f64 / 255.0;
        for c in 0..3 {
            d[c] = (s[c] as f64 * alpha).round() as u8;
        }
    }
    out
}

// Test sizes: small (remainder only), medium (SIMD + remainder), large (multiple SIMD chunks)
const TEST_PIXEL_COUNTS: &[usize] = &[1, 2, 3, 7, 8, 9, 15, 16, 31, 32, 33, 63, 64, 65, 100];

// -----------------------------------------------------------------------
// Per-pixel routines
// -----------------------------------------------------------------------

#[test]
fn mul_div255_matches_float_rounding() {
    for c in 0..=255u8 {
        for a in 0..=255u8 {
            let expected = (c as f64 * (a as f64 / 255.0)).round() as u8;
            assert_eq!(mul_div255(c, a), expected, "c={c} a={a}");
        }
    }
}

#[test]
fn composite_opaque_and_transparent() {
    let mut dst = [0u8; 3];
    composite_bgra32_to_bgr24(&[10, 20, 30, 255], &mut dst);
    assert_eq!(dst, [10, 20, 30]);

    composite_bgra32_to_bgr24(&[10, 20, 30, 0], &mut dst);
    assert_eq!(dst, [0, 0, 0]);

    composite_bgra32_to_bgr24(&[255, 0, 0, 128], &mut dst);
    assert_eq!(dst, [128, 0, 0]);
}

#[test]
fn identity_copies_three_bytes() {
    let mut dst = [9u8; 3];
    identity_bgr24(&[1, 2, 3], &mut dst);
    assert_eq!(dst, [1, 2, 3]);
}

// -----------------------------------------------------------------------
// SIMD-dispatched operations: tested at every capability tier
// -----------------------------------------------------------------------

#[test]
fn permutation_composite() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_4bpp(n);
            let expected = ref_composite(&src);
            let mut dst = vec![0u8; n * 3];
            bgra_to_bgr_composite(&src, &mut dst).unwrap();
            assert_eq!(dst, expected, "composite n={n} tier={perm}");
        }
    });
    std::eprintln!("composite: {report}");
}

#[test]
fn permutation_composite_row_kernel() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_4bpp(n);
            let expected = ref_composite(&src);
            let mut dst = vec![0u8; n * 3];
            composite_bgra32_to_bgr24_row(&src, &mut dst);
            assert_eq!(dst, expected, "row kernel n={n} tier={perm}");
        }
    });
    std::eprintln!("composite_row_kernel: {report}");
}

#[test]
fn permutation_composite_all_alphas() {
    // Every (channel, alpha) pair passes through the SIMD body at least once.
    let src: Vec<u8> = (0..=255u8)
        .flat_map(|a| (0..=255u8).map(move |c| [c, 255 - c, c / 2, a]))
        .flatten()
        .collect();
    let expected = ref_composite(&src);
    let report = for_each_token_permutation(policy(), |perm| {
        let mut dst = vec![0u8; src.len() / 4 * 3];
        bgra_to_bgr_composite(&src, &mut dst).unwrap();
        assert!(dst == expected, "all alphas tier={perm}");
    });
    std::eprintln!("composite_all_alphas: {report}");
}

#[test]
fn permutation_composite_strided() {
    let report = for_each_token_permutation(policy(), |perm| {
        let w = 10;
        let h = 3;
        let src_stride = w * 4 + 8;
        let dst_stride = w * 3 + 6;
        let src: Vec<u8> = (0..src_stride * h).map(|i| (i % 251) as u8).collect();
        let mut dst = vec![0xCCu8; dst_stride * h];
        bgra_to_bgr_composite_strided(&src, &mut dst, w, h, src_stride, dst_stride).unwrap();
        for y in 0..h {
            let expected = ref_composite(&src[y * src_stride..][..w * 4]);
            assert_eq!(
                &dst[y * dst_stride..][..w * 3],
                &expected[..],
                "strided composite y={y} tier={perm}"
            );
            assert!(
                dst[y * dst_stride + w * 3..(y + 1) * dst_stride]
                    .iter()
                    .all(|&b| b == 0xCC),
                "padding written y={y} tier={perm}"
            );
        }
    });
    std::eprintln!("composite_strided: {report}");
}

// -----------------------------------------------------------------------
// Size validation
// -----------------------------------------------------------------------

#[test]
fn test_size_errors() {
    assert_eq!(
        bgra_to_bgr_composite(&[0; 5], &mut [0; 6]),
        Err(BitmapError::NotPixelAligned)
    );
    assert_eq!(
        bgra_to_bgr_composite(&[], &mut [0; 6]),
        Err(BitmapError::NotPixelAligned)
    );
    assert_eq!(
        bgra_to_bgr_composite(&[0; 8], &mut [0; 3]),
        Err(BitmapError::PixelCountMismatch)
    );
}

#[test]
fn test_strided_size_errors() {
    // stride < width * bpp
    assert_eq!(
        bgra_to_bgr_composite_strided(&[0; 32], &mut [0; 12], 2, 2, 4, 6),
        Err(BitmapError::StrideTooSmall)
    );
    // source too small
    assert_eq!(
        bgra_to_bgr_composite_strided(&[0; 10], &mut [0; 12], 2, 2, 8, 6),
        Err(BitmapError::InsufficientData)
    );
    // destination too small
    assert_eq!(
        bgra_to_bgr_composite_strided(&[0; 16], &mut [0; 11], 2, 2, 8, 6),
        Err(BitmapError::InsufficientData)
    );
    // zero width
    assert_eq!(
        bgra_to_bgr_composite_strided(&[0; 8], &mut [0; 6], 0, 1, 8, 6),
        Err(BitmapError::InvalidDimension)
    );
}
