//! Packed-B SGEMM microkernel in Rust, built from scratch.
//!
//! The fast part of a BLAS-style SGEMM is two small pieces: a packer that
//! reshapes B so the hot loop reads it with unit stride, and a microkernel
//! that keeps a few rows of C in vector registers while it streams over K.
//! This crate implements exactly those two pieces for 128-bit SIMD (SSE on
//! x86_64, NEON on aarch64, `wide` everywhere else), plus a small
//! single-threaded driver to tie them together.
//!
//! ## Usage
//!
//! ```
//! use sgemm::{sgemm, Transpose};
//!
//! let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]; // 2×3
//! let b = [1.0, 0.0, 0.0, 1.0, 1.0, 1.0]; // 3×2
//! let mut c = [f32::NAN; 4];
//!
//! // C := 1.0 * A * B
//! sgemm(Transpose::NoTrans, 2, 2, 3, 1.0, &a, 3, &b, 2, &mut c, 2, true)?;
//! assert_eq!(c, [4.0, 5.0, 10.0, 11.0]);
//! # Ok::<(), sgemm::SgemmError>(())
//! ```
//!
//! Driving the kernel yourself: pack B once, then walk the rows of A and C,
//! advancing by however many rows each call handled.
//!
//! ```
//! use sgemm::{compute_row_tile, copy_pack_b, packed_len, NativeF32x4};
//!
//! let (m, n, k) = (3, 2, 2);
//! let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let b = [1.0, 1.0, 0.0, 2.0];
//! let mut c = [1.0f32; 6];
//!
//! let mut packed = vec![0.0; packed_len(n, k)];
//! copy_pack_b(&mut packed, &b, n, k, n)?;
//!
//! let mut row = 0;
//! while row < m {
//!     row += unsafe {
//!         compute_row_tile::<NativeF32x4>(
//!             a.as_ptr().add(row * k),
//!             packed.as_ptr(),
//!             c.as_mut_ptr().add(row * n),
//!             k, m - row, n, k, n, 1.0, false,
//!         )
//!     };
//! }
//! assert_eq!(c, [2.0, 6.0, 4.0, 12.0, 6.0, 18.0]);
//! # Ok::<(), sgemm::SgemmError>(())
//! ```
//!
//! ## What's inside
//!
//! - 16×4 transpose packer built only from lane shuffles
//! - One generic microkernel instantiated for 4-, 2- and 1-row tiles
//! - Overwrite (`C := alpha*A*B`) and accumulate (`C += alpha*A*B`) modes
//! - K blocking in the driver, tuned like the L1 blocking of a classic GEMM

pub mod error;
pub mod kernels;
pub mod matrix;
pub mod pack;
pub mod simd;

pub use error::{Result, SgemmError};
pub use kernels::{compute_row_tile, select_tile_width};
pub use matrix::naive::sgemm_naive;
pub use pack::{
    copy_pack_b, pack_transpose_tile, pack_transpose_tile_checked, packed_len, transpose_pack_b,
};
pub use simd::{F32x4, NativeF32x4, PortableF32x4};

use crate::error::{check_len, check_stride, required_len};
use log::{debug, trace};

/// K rows packed per block. Keeps one packed panel small enough for L1.
pub const K_BLOCK: usize = 256;

/// How B is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transpose {
    /// B is K×N row-major.
    NoTrans,
    /// B is supplied as Bᵀ, N×K row-major.
    Trans,
}

/// Matrix multiply: C += A * B
///
/// Dense row-major shorthand for [`sgemm`]: A is m×k, B is k×n, C is m×n,
/// alpha is 1 and C is accumulated into.
pub fn multiply(a: &[f32], b: &[f32], c: &mut [f32], m: usize, n: usize, k: usize) -> Result<()> {
    sgemm(Transpose::NoTrans, m, n, k, 1.0, a, k, b, n, c, n, false)
}

/// Single-precision GEMM on the native vector backend.
///
/// `C := alpha*A*B` when `zero_mode` is set, `C += alpha*A*B` otherwise.
/// See [`sgemm_with`] for the details.
#[allow(clippy::too_many_arguments)]
pub fn sgemm(
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: f32,
    a: &[f32],
    lda: usize,
    b: &[f32],
    ldb: usize,
    c: &mut [f32],
    ldc: usize,
    zero_mode: bool,
) -> Result<()> {
    sgemm_with::<NativeF32x4>(trans_b, m, n, k, alpha, a, lda, b, ldb, c, ldc, zero_mode)
}

/// Single-precision GEMM on an explicit vector backend.
///
/// Checks strides and slice lengths, then for every block of up to
/// [`K_BLOCK`] rows of K: packs B, and walks the rows of C with
/// [`compute_row_tile`]. Only the first K block honours `zero_mode`; the
/// rest accumulate onto it.
///
/// # Errors
///
/// - [`SgemmError::StrideTooSmall`] if a leading dimension is shorter than its row
/// - [`SgemmError::BufferTooSmall`] if a slice cannot hold its matrix
#[allow(clippy::too_many_arguments)]
pub fn sgemm_with<V: F32x4>(
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: f32,
    a: &[f32],
    lda: usize,
    b: &[f32],
    ldb: usize,
    c: &mut [f32],
    ldc: usize,
    zero_mode: bool,
) -> Result<()> {
    let (b_rows, b_cols) = match trans_b {
        Transpose::NoTrans => (k, n),
        Transpose::Trans => (n, k),
    };
    check_stride("A", lda, k)?;
    check_stride("B", ldb, b_cols)?;
    check_stride("C", ldc, n)?;
    check_len("A", required_len(m, k, lda), a.len())?;
    check_len("B", required_len(b_rows, b_cols, ldb), b.len())?;
    check_len("C", required_len(m, n, ldc), c.len())?;

    debug!(
        "sgemm: m={} n={} k={} trans_b={:?} alpha={} zero_mode={}",
        m, n, k, trans_b, alpha, zero_mode
    );

    if m == 0 || n == 0 {
        return Ok(());
    }

    if k == 0 {
        if zero_mode {
            for row in c.chunks_mut(ldc).take(m) {
                row[..n].fill(0.0);
            }
        }
        return Ok(());
    }

    let mut packed = Vec::new();
    for k_start in (0..k).step_by(K_BLOCK) {
        let k_block = (k - k_start).min(K_BLOCK);

        packed.clear();
        packed.resize(packed_len(n, k_block), 0.0);
        match trans_b {
            Transpose::NoTrans => copy_pack_b(&mut packed, &b[k_start * ldb..], ldb, k_block, n)?,
            Transpose::Trans => {
                transpose_pack_b::<V>(&mut packed, &b[k_start..], ldb, n, k_block)?
            }
        }
        trace!(
            "sgemm: k block {}..{}, packed {} floats",
            k_start,
            k_start + k_block,
            packed.len()
        );

        let block_zero_mode = zero_mode && k_start == 0;
        let mut row = 0;
        while row < m {
            // SAFETY: strides and slice lengths were checked above, so rows
            // row..m of A (columns k_start..k_start + k_block) and of C
            // (columns 0..n) are in bounds; `packed` holds
            // packed_len(n, k_block) floats.
            row += unsafe {
                compute_row_tile::<V>(
                    a.as_ptr().add(row * lda + k_start),
                    packed.as_ptr(),
                    c.as_mut_ptr().add(row * ldc),
                    k_block,
                    m - row,
                    n,
                    lda,
                    ldc,
                    alpha,
                    block_zero_mode,
                )
            };
        }
    }

    Ok(())
}
