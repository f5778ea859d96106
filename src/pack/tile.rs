//! 16×4 transpose packer.

use log::warn;

use super::{PACK_TILE_COLS, PACK_TILE_ROWS, PACKED_TILE_LEN, PANEL_WIDTH};
use crate::error::{Result, SgemmError, check_len, check_stride, required_len};
use crate::simd::{F32x4, NativeF32x4};

/// Transposes 16 rows × 4 columns of `src` into 4 k-steps of a packed panel.
///
/// Writes `dst[c * 16 + r] = src[r * ldb + c]` for `r` in 0..16, `c` in 0..4,
/// using only lane shuffles:
///
/// 1. `interleave_low` each pair of rows: `[r0c0 r1c0 r0c1 r1c1]`
/// 2. `concat_low` / `concat_high` two such pairs: column 0 and column 1 for
///    four rows
/// 3. repeat with `interleave_high` for columns 2 and 3
///
/// Columns 0-1 land in floats 0..32, columns 2-3 in 32..64.
///
/// # Safety
///
/// Caller must ensure:
/// - `src.add(r * ldb)` is valid for reading 4 f32s, for r in 0..16
/// - `dst` is valid for writing 64 f32s and does not overlap the source rows
/// - `ldb >= 4`
#[inline]
pub unsafe fn pack_transpose_tile<V: F32x4>(dst: *mut f32, src: *const f32, ldb: usize) {
    debug_assert!(!dst.is_null() && !src.is_null());
    debug_assert!(ldb >= PACK_TILE_COLS, "ldb {} < {}", ldb, PACK_TILE_COLS);

    // SAFETY: caller guarantees 16 readable rows of 4 floats.
    let rows: [V; PACK_TILE_ROWS] =
        std::array::from_fn(|r| unsafe { V::load(src.add(r * ldb)) });

    unsafe {
        transpose_column_pair(&rows, dst, V::interleave_low);
        transpose_column_pair(&rows, dst.add(2 * PANEL_WIDTH), V::interleave_high);
    }
}

/// Writes two packed columns (32 floats) from the lanes `merge` selects.
#[inline(always)]
unsafe fn transpose_column_pair<V: F32x4>(
    rows: &[V; PACK_TILE_ROWS],
    dst: *mut f32,
    merge: impl Fn(V, V) -> V,
) {
    let pairs: [V; PACK_TILE_ROWS / 2] =
        std::array::from_fn(|p| merge(rows[2 * p], rows[2 * p + 1]));

    for g in 0..PACK_TILE_ROWS / 4 {
        let first = pairs[2 * g].concat_low(pairs[2 * g + 1]);
        let second = pairs[2 * g].concat_high(pairs[2 * g + 1]);
        unsafe {
            first.store(dst.add(4 * g));
            second.store(dst.add(PANEL_WIDTH + 4 * g));
        }
    }
}

/// Slice-checked front end to [`pack_transpose_tile`].
///
/// `rows × cols` is the shape the caller wants packed. Anything other than
/// 16×4 is rejected with [`SgemmError::UnsupportedShape`] and `dst` is left
/// untouched; remainders belong to the caller's scalar path
/// (see [`transpose_pack_b`](super::transpose_pack_b)).
pub fn pack_transpose_tile_checked(
    dst: &mut [f32],
    src: &[f32],
    ldb: usize,
    rows: usize,
    cols: usize,
) -> Result<()> {
    if rows != PACK_TILE_ROWS || cols != PACK_TILE_COLS {
        warn!(
            "transpose pack: rejecting {}x{} tile, only {}x{} is supported",
            rows, cols, PACK_TILE_ROWS, PACK_TILE_COLS
        );
        return Err(SgemmError::UnsupportedShape { rows, cols });
    }
    check_stride("B", ldb, cols)?;
    check_len("B", required_len(rows, cols, ldb), src.len())?;
    check_len("packed B", PACKED_TILE_LEN, dst.len())?;

    // SAFETY: shape, stride and both lengths were checked above.
    unsafe { pack_transpose_tile::<NativeF32x4>(dst.as_mut_ptr(), src.as_ptr(), ldb) };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::transpose::transpose;
    use crate::simd::PortableF32x4;
    use proptest::prelude::*;

    fn tile_source(ldb: usize) -> Vec<f32> {
        let specials = [-0.0, f32::MIN_POSITIVE / 4.0, -1.5e-42, f32::MAX, -3.25];
        (0..PACK_TILE_ROWS * ldb)
            .map(|i| {
                if i % 7 == 3 {
                    specials[i % specials.len()]
                } else {
                    (i as f32) * if i % 2 == 0 { 1.0 } else { -0.5 }
                }
            })
            .collect()
    }

    fn check_round_trip<V: F32x4>(src: &[f32], ldb: usize) {
        let mut packed = vec![f32::NAN; PACKED_TILE_LEN];
        unsafe { pack_transpose_tile::<V>(packed.as_mut_ptr(), src.as_ptr(), ldb) };

        // Packed tile is a 4×16 matrix; its transpose is the original 16×4.
        let mut restored = vec![0.0f32; PACKED_TILE_LEN];
        transpose(&packed, &mut restored, PACK_TILE_COLS, PACK_TILE_ROWS);

        for r in 0..PACK_TILE_ROWS {
            for c in 0..PACK_TILE_COLS {
                let want = src[r * ldb + c];
                let got = restored[r * PACK_TILE_COLS + c];
                assert_eq!(
                    want.to_bits(),
                    got.to_bits(),
                    "row {} col {}: want {:e}, got {:e}",
                    r,
                    c,
                    want,
                    got
                );
            }
        }
    }

    #[test]
    fn test_round_trip_portable() {
        check_round_trip::<PortableF32x4>(&tile_source(4), 4);
        check_round_trip::<PortableF32x4>(&tile_source(9), 9);
    }

    #[test]
    fn test_round_trip_native() {
        check_round_trip::<NativeF32x4>(&tile_source(4), 4);
        check_round_trip::<NativeF32x4>(&tile_source(13), 13);
    }

    /// Any finite bit pattern, subnormals and both zeros included.
    fn finite_f32() -> impl Strategy<Value = f32> {
        any::<u32>()
            .prop_map(f32::from_bits)
            .prop_filter("finite", |v| v.is_finite())
    }

    fn arb_tile() -> impl Strategy<Value = (usize, Vec<f32>)> {
        (PACK_TILE_COLS..10).prop_flat_map(|ldb| {
            (
                Just(ldb),
                prop::collection::vec(finite_f32(), PACK_TILE_ROWS * ldb),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_round_trip_is_bit_exact((ldb, src) in arb_tile()) {
            check_round_trip::<PortableF32x4>(&src, ldb);
            check_round_trip::<NativeF32x4>(&src, ldb);
        }
    }

    #[test]
    fn test_packed_layout() {
        let ldb = 6;
        let src: Vec<f32> = (0..PACK_TILE_ROWS * ldb).map(|i| i as f32).collect();
        let mut packed = vec![0.0f32; PACKED_TILE_LEN];
        unsafe { pack_transpose_tile::<NativeF32x4>(packed.as_mut_ptr(), src.as_ptr(), ldb) };

        for c in 0..PACK_TILE_COLS {
            for r in 0..PACK_TILE_ROWS {
                assert_eq!(packed[c * PANEL_WIDTH + r], src[r * ldb + c]);
            }
        }
    }

    #[test]
    fn test_backends_agree() {
        let ldb = 7;
        let src = tile_source(ldb);
        let mut portable = vec![0.0f32; PACKED_TILE_LEN];
        let mut native = vec![0.0f32; PACKED_TILE_LEN];
        unsafe {
            pack_transpose_tile::<PortableF32x4>(portable.as_mut_ptr(), src.as_ptr(), ldb);
            pack_transpose_tile::<NativeF32x4>(native.as_mut_ptr(), src.as_ptr(), ldb);
        }
        let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&portable), bits(&native));
    }

    #[test]
    fn test_writes_exactly_one_tile() {
        let src = tile_source(4);
        let mut packed = vec![42.0f32; PACKED_TILE_LEN + 8];
        unsafe { pack_transpose_tile::<NativeF32x4>(packed.as_mut_ptr(), src.as_ptr(), 4) };
        assert!(packed[PACKED_TILE_LEN..].iter().all(|&v| v == 42.0));
        // Source is never written.
        assert_eq!(src, tile_source(4));
    }

    #[test]
    fn test_checked_rejects_other_shapes() {
        let src = vec![1.0f32; 17 * 5];
        for (rows, cols) in [(15, 4), (17, 4), (16, 3), (16, 5), (0, 0)] {
            let mut dst = vec![-1.0f32; PACKED_TILE_LEN];
            let err = pack_transpose_tile_checked(&mut dst, &src, 5, rows, cols).unwrap_err();
            assert_eq!(err, SgemmError::UnsupportedShape { rows, cols });
            assert!(dst.iter().all(|&v| v == -1.0), "dst touched for {}x{}", rows, cols);
        }
    }

    #[test]
    fn test_checked_validates_buffers() {
        let src = vec![0.0f32; PACK_TILE_ROWS * 4];
        let mut dst = vec![0.0f32; PACKED_TILE_LEN - 1];
        assert!(matches!(
            pack_transpose_tile_checked(&mut dst, &src, 4, 16, 4),
            Err(SgemmError::BufferTooSmall { operand: "packed B", .. })
        ));

        let mut dst = vec![0.0f32; PACKED_TILE_LEN];
        assert!(matches!(
            pack_transpose_tile_checked(&mut dst, &src[..60], 4, 16, 4),
            Err(SgemmError::BufferTooSmall { operand: "B", needed: 64, actual: 60 })
        ));
        assert!(matches!(
            pack_transpose_tile_checked(&mut dst, &src, 3, 16, 4),
            Err(SgemmError::StrideTooSmall { operand: "B", stride: 3, min: 4 })
        ));
        assert!(matches!(
            pack_transpose_tile_checked(&mut dst, &src, usize::MAX / 8, 16, 4),
            Err(SgemmError::BufferTooSmall { operand: "B", needed: usize::MAX, .. })
        ));
    }

    #[test]
    fn test_checked_packs_tile() {
        let ldb = 5;
        let src = tile_source(ldb);
        let mut checked = vec![0.0f32; PACKED_TILE_LEN];
        let mut raw = vec![0.0f32; PACKED_TILE_LEN];
        pack_transpose_tile_checked(&mut checked, &src, ldb, 16, 4).unwrap();
        unsafe { pack_transpose_tile::<NativeF32x4>(raw.as_mut_ptr(), src.as_ptr(), ldb) };
        assert_eq!(
            checked.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            raw.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }
}
