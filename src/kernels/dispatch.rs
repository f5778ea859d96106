//! Row-tile dispatcher: picks the tile height and runs the microkernel.

use super::row_tile::process_rows;
use crate::simd::F32x4;

/// Tile heights the microkernel is instantiated for, largest first.
pub const ROW_TILE_WIDTHS: [usize; 3] = [4, 2, 1];

/// Largest tile height that fits in `count_m` remaining rows.
///
/// Returns 0 when there are no rows left.
pub fn select_tile_width(count_m: usize) -> usize {
    ROW_TILE_WIDTHS
        .into_iter()
        .find(|&width| width <= count_m)
        .unwrap_or(0)
}

/// Computes one row tile of `C := alpha*A*B` (zero mode) or `C += alpha*A*B`.
///
/// Broadcasts alpha once, runs the 4-, 2- or 1-row microkernel depending on
/// how many of the `count_m` remaining rows fit, and returns the number of
/// rows handled so the caller can advance its row cursor. With
/// `count_m == 0` nothing is touched and 0 is returned.
///
/// `packed_b` must be in the panel layout produced by
/// [`copy_pack_b`](crate::pack::copy_pack_b) or
/// [`transpose_pack_b`](crate::pack::transpose_pack_b).
///
/// # Safety
///
/// Caller must ensure, with `rows = select_tile_width(count_m)`:
/// - `a.add(r * lda)` is valid for reading `count_k` f32s, for r in 0..rows
/// - `packed_b` holds `packed_len(count_n, count_k)` f32s
/// - `c.add(r * ldc)` is valid for reading and writing `count_n` f32s, for r in 0..rows
/// - C does not overlap A or packed B
/// - `lda >= count_k` and `ldc >= count_n`
#[allow(clippy::too_many_arguments)]
pub unsafe fn compute_row_tile<V: F32x4>(
    a: *const f32,
    packed_b: *const f32,
    c: *mut f32,
    count_k: usize,
    count_m: usize,
    count_n: usize,
    lda: usize,
    ldc: usize,
    alpha: f32,
    zero_mode: bool,
) -> usize {
    debug_assert!(lda >= count_k, "lda {} < count_k {}", lda, count_k);
    debug_assert!(ldc >= count_n, "ldc {} < count_n {}", ldc, count_n);

    let alpha = V::splat(alpha);

    unsafe {
        match select_tile_width(count_m) {
            4 => process_rows::<V, 4>(
                a, packed_b, c, count_k, count_n, lda, ldc, alpha, zero_mode,
            ),
            2 => process_rows::<V, 2>(
                a, packed_b, c, count_k, count_n, lda, ldc, alpha, zero_mode,
            ),
            1 => process_rows::<V, 1>(
                a, packed_b, c, count_k, count_n, lda, ldc, alpha, zero_mode,
            ),
            _ => 0,
        }
    }
}
