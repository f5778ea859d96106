//! Whole-block packers producing the panel layout for a K×N slice of B.

use std::ops::Range;

use super::tile::pack_transpose_tile;
use super::{PACK_TILE_COLS, PACK_TILE_ROWS, PACKED_TILE_LEN, PANEL_WIDTH};
use crate::error::{Result, check_len, check_stride, required_len};
use crate::simd::F32x4;

// One transpose tile covers exactly one panel width.
const _: () = assert!(PACK_TILE_ROWS == PANEL_WIDTH);
const _: () = assert!(PACKED_TILE_LEN == PACK_TILE_COLS * PANEL_WIDTH);

/// Floats needed to pack `k` rows of an `n`-column B.
///
/// The last panel is padded to the full panel width. Saturates at
/// `usize::MAX` when the shape cannot be addressed.
pub fn packed_len(n: usize, k: usize) -> usize {
    n.div_ceil(PANEL_WIDTH)
        .checked_mul(PANEL_WIDTH)
        .and_then(|len| len.checked_mul(k))
        .unwrap_or(usize::MAX)
}

/// Packs B stored as K×N row-major (stride `ldb`) into panels.
///
/// Full panel rows are block-copied; columns past `n` in the last panel
/// are zero-filled.
pub fn copy_pack_b(dst: &mut [f32], b: &[f32], ldb: usize, k: usize, n: usize) -> Result<()> {
    check_stride("B", ldb, n)?;
    check_len("B", required_len(k, n, ldb), b.len())?;
    check_len("packed B", packed_len(n, k), dst.len())?;

    if k == 0 || n == 0 {
        return Ok(());
    }

    let panels = dst[..packed_len(n, k)].chunks_exact_mut(PANEL_WIDTH * k);
    for (panel, panel_dst) in panels.enumerate() {
        let col0 = panel * PANEL_WIDTH;
        let width = (n - col0).min(PANEL_WIDTH);

        for (row, out) in panel_dst.chunks_exact_mut(PANEL_WIDTH).enumerate() {
            let start = row * ldb + col0;
            out[..width].copy_from_slice(&b[start..start + width]);
            out[width..].fill(0.0);
        }
    }
    Ok(())
}

/// Packs B supplied transposed, stored as N×K row-major (stride `ldbt`).
///
/// Every full 16×4 block goes through [`pack_transpose_tile`]. The k
/// columns left over after the last full tile, and a final panel with fewer
/// than 16 rows, are packed by a scalar loop that zero-pads.
pub fn transpose_pack_b<V: F32x4>(
    dst: &mut [f32],
    bt: &[f32],
    ldbt: usize,
    n: usize,
    k: usize,
) -> Result<()> {
    check_stride("B", ldbt, k)?;
    check_len("B", required_len(n, k, ldbt), bt.len())?;
    check_len("packed B", packed_len(n, k), dst.len())?;

    if k == 0 || n == 0 {
        return Ok(());
    }

    let k_tiled = (k / PACK_TILE_COLS) * PACK_TILE_COLS;

    let panels = dst[..packed_len(n, k)].chunks_exact_mut(PANEL_WIDTH * k);
    for (panel, panel_dst) in panels.enumerate() {
        let row0 = panel * PANEL_WIDTH;
        let width = (n - row0).min(PANEL_WIDTH);

        if width < PACK_TILE_ROWS {
            pack_transposed_scalar(panel_dst, bt, ldbt, row0, width, 0..k);
            continue;
        }

        for k0 in (0..k_tiled).step_by(PACK_TILE_COLS) {
            // SAFETY: rows row0..row0+16 and columns k0..k0+4 lie inside the
            // n×k source checked above; the destination slice holds
            // PANEL_WIDTH * k floats and k0 + 4 <= k.
            unsafe {
                pack_transpose_tile::<V>(
                    panel_dst.as_mut_ptr().add(k0 * PANEL_WIDTH),
                    bt.as_ptr().add(row0 * ldbt + k0),
                    ldbt,
                );
            }
        }
        pack_transposed_scalar(panel_dst, bt, ldbt, row0, width, k_tiled..k);
    }
    Ok(())
}

fn pack_transposed_scalar(
    panel_dst: &mut [f32],
    bt: &[f32],
    ldbt: usize,
    row0: usize,
    width: usize,
    ks: Range<usize>,
) {
    for kk in ks {
        let out = &mut panel_dst[kk * PANEL_WIDTH..(kk + 1) * PANEL_WIDTH];
        for (j, value) in out.iter_mut().enumerate() {
            *value = if j < width {
                bt[(row0 + j) * ldbt + kk]
            } else {
                0.0
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SgemmError;
    use crate::matrix::transpose::transpose;
    use crate::simd::{NativeF32x4, PortableF32x4};

    /// Element (kk, j) of the packed buffer; j may point into the padding.
    fn packed_at(packed: &[f32], n: usize, k: usize, kk: usize, j: usize) -> f32 {
        assert!(j < n.div_ceil(PANEL_WIDTH) * PANEL_WIDTH);
        packed[(j / PANEL_WIDTH) * PANEL_WIDTH * k + kk * PANEL_WIDTH + j % PANEL_WIDTH]
    }

    #[test]
    fn test_packed_len() {
        assert_eq!(packed_len(0, 5), 0);
        assert_eq!(packed_len(1, 3), 48);
        assert_eq!(packed_len(16, 3), 48);
        assert_eq!(packed_len(17, 3), 96);
        assert_eq!(packed_len(40, 0), 0);
        assert_eq!(packed_len(usize::MAX, 2), usize::MAX);
        assert_eq!(packed_len(17, usize::MAX), usize::MAX);
    }

    #[test]
    fn test_pack_rejects_overflowing_strides() {
        let bt = [1.0f32; 4];
        let mut dst = vec![0.0f32; packed_len(17, 4)];
        assert_eq!(
            transpose_pack_b::<NativeF32x4>(&mut dst, &bt, 1 << 60, 17, 4),
            Err(SgemmError::BufferTooSmall { operand: "B", needed: usize::MAX, actual: 4 })
        );
        assert_eq!(
            copy_pack_b(&mut dst, &bt, usize::MAX, 2, 2),
            Err(SgemmError::BufferTooSmall { operand: "B", needed: usize::MAX, actual: 4 })
        );
        assert!(dst.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_copy_pack_b_layout_and_padding() {
        let (k, n, ldb) = (3, 20, 22);
        let b: Vec<f32> = (0..k * ldb).map(|i| i as f32 + 1.0).collect();
        let mut packed = vec![f32::NAN; packed_len(n, k)];

        copy_pack_b(&mut packed, &b, ldb, k, n).unwrap();

        for kk in 0..k {
            for j in 0..32 {
                let want = if j < n { b[kk * ldb + j] } else { 0.0 };
                assert_eq!(packed_at(&packed, n, k, kk, j), want, "k {} col {}", kk, j);
            }
        }
    }

    fn check_transpose_matches_copy<V: F32x4>(n: usize, k: usize) {
        let ldb = n + 3;
        let b: Vec<f32> = (0..k * ldb).map(|i| ((i * 7) % 23) as f32 - 11.0).collect();

        // Tight N×K copy of B, then re-strided by 2 extra columns.
        let mut dense = vec![0.0f32; k * n];
        for kk in 0..k {
            dense[kk * n..(kk + 1) * n].copy_from_slice(&b[kk * ldb..kk * ldb + n]);
        }
        let mut bt_tight = vec![0.0f32; n * k];
        transpose(&dense, &mut bt_tight, k, n);
        let ldbt = k + 2;
        let mut bt = vec![0.0f32; n * ldbt];
        for j in 0..n {
            bt[j * ldbt..j * ldbt + k].copy_from_slice(&bt_tight[j * k..(j + 1) * k]);
        }

        let mut from_copy = vec![f32::NAN; packed_len(n, k)];
        let mut from_transpose = vec![f32::NAN; packed_len(n, k)];
        copy_pack_b(&mut from_copy, &b, ldb, k, n).unwrap();
        transpose_pack_b::<V>(&mut from_transpose, &bt, ldbt, n, k).unwrap();

        assert_eq!(from_copy, from_transpose, "n {} k {}", n, k);
    }

    #[test]
    fn test_transpose_pack_matches_copy_pack() {
        for (n, k) in [(16, 4), (16, 8), (32, 12), (16, 5), (19, 4), (33, 7), (5, 3), (48, 1)] {
            check_transpose_matches_copy::<NativeF32x4>(n, k);
            check_transpose_matches_copy::<PortableF32x4>(n, k);
        }
    }

    #[test]
    fn test_pack_rejects_short_buffers() {
        let b = vec![0.0f32; 12];
        let mut dst = vec![0.0f32; packed_len(4, 3) - 1];
        assert!(matches!(
            copy_pack_b(&mut dst, &b, 4, 3, 4),
            Err(SgemmError::BufferTooSmall { operand: "packed B", .. })
        ));
        let mut dst = vec![0.0f32; packed_len(4, 3)];
        assert!(matches!(
            copy_pack_b(&mut dst, &b[..11], 4, 3, 4),
            Err(SgemmError::BufferTooSmall { operand: "B", needed: 12, actual: 11 })
        ));
        assert!(matches!(
            transpose_pack_b::<NativeF32x4>(&mut dst, &b, 2, 4, 3),
            Err(SgemmError::StrideTooSmall { operand: "B", stride: 2, min: 3 })
        ));
    }

    #[test]
    fn test_empty_blocks_are_noops() {
        let mut dst: Vec<f32> = Vec::new();
        copy_pack_b(&mut dst, &[], 0, 0, 0).unwrap();
        copy_pack_b(&mut dst, &[], 8, 0, 8).unwrap();
        transpose_pack_b::<NativeF32x4>(&mut dst, &[], 4, 0, 4).unwrap();
    }
}
