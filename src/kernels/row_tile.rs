//! Row-tiled SGEMM microkernel, generic over the tile height.

use crate::pack::PANEL_WIDTH;
use crate::simd::{F32x4, LANES};

/// Vector accumulators per row for one packed panel.
const VECTORS: usize = PANEL_WIDTH / LANES;

/// Computes `W` rows of C against every panel of packed B.
///
/// For each 16-column panel this keeps `W × 4` accumulators, streams k in
/// ascending order (splat one A value per row, load four B vectors, then
/// multiply-add), scales by `alpha`, and stores or accumulates into C.
/// The final panel may cover fewer than 16 columns of C; whole vectors are
/// stored first, then the remaining lanes one at a time.
///
/// The `W` accumulator rows are a fixed-size array, so each instantiation
/// unrolls into its own register allocation just like the hand-written
/// 4-, 2- and 1-row variants would.
///
/// Returns `W`.
///
/// # Safety
///
/// Caller must ensure:
/// - `a.add(r * lda)` is valid for reading `count_k` f32s, for r in 0..W
/// - `packed_b` holds `ceil(count_n / 16) * 16 * count_k` f32s in panel layout
/// - `c.add(r * ldc)` is valid for reading and writing `count_n` f32s, for r in 0..W
/// - C does not overlap A or packed B
#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub(crate) unsafe fn process_rows<V: F32x4, const W: usize>(
    a: *const f32,
    packed_b: *const f32,
    c: *mut f32,
    count_k: usize,
    count_n: usize,
    lda: usize,
    ldc: usize,
    alpha: V,
    zero_mode: bool,
) -> usize {
    let mut b = packed_b;
    let mut c = c;
    let mut remaining = count_n;

    while remaining > 0 {
        let mut acc = [[V::zero(); VECTORS]; W];

        for p in 0..count_k {
            let b_row = unsafe { b.add(p * PANEL_WIDTH) };
            let b_vec: [V; VECTORS] =
                std::array::from_fn(|v| unsafe { V::load(b_row.add(v * LANES)) });

            for (r, acc_row) in acc.iter_mut().enumerate() {
                let a_val = V::splat(unsafe { *a.add(r * lda + p) });
                for (slot, &b_val) in acc_row.iter_mut().zip(&b_vec) {
                    *slot = a_val.mul_add(b_val, *slot);
                }
            }
        }

        let width = remaining.min(PANEL_WIDTH);
        for (r, acc_row) in acc.iter().enumerate() {
            unsafe { store_row(acc_row, alpha, c.add(r * ldc), width, zero_mode) };
        }

        remaining -= width;
        if remaining > 0 {
            unsafe {
                c = c.add(PANEL_WIDTH);
                b = b.add(PANEL_WIDTH * count_k);
            }
        }
    }

    W
}

/// Scales one row of accumulators by alpha and writes the first `width`
/// columns to `c`.
#[inline(always)]
unsafe fn store_row<V: F32x4>(
    acc: &[V; VECTORS],
    alpha: V,
    c: *mut f32,
    width: usize,
    zero_mode: bool,
) {
    let full = width / LANES;

    for (v, &value) in acc.iter().enumerate().take(full) {
        let scaled = value.mul(alpha);
        unsafe {
            let dst = c.add(v * LANES);
            let out = if zero_mode {
                scaled
            } else {
                scaled.add(V::load(dst))
            };
            out.store(dst);
        }
    }

    let tail = width % LANES;
    if tail > 0 {
        let lanes = acc[full].mul(alpha).to_array();
        for (i, &lane) in lanes.iter().enumerate().take(tail) {
            unsafe {
                let dst = c.add(full * LANES + i);
                *dst = if zero_mode { lane } else { lane + *dst };
            }
        }
    }
}
