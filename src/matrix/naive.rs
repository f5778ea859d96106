/// Reference SGEMM using the textbook i-j-k loop order.
///
/// Computes `C := alpha*A*B` when `zero_mode` is set, `C += alpha*A*B`
/// otherwise. Each dot product is summed in ascending k, scaled by alpha,
/// then stored or added, which is the same order the packed kernel uses.
/// In zero mode C is never read.
///
/// Slow on purpose: the inner loop walks B with stride `ldb`. Use this as a
/// correctness baseline, not for performance.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major, stride `lda`
/// * `b` - Matrix B (k × n), row-major, stride `ldb`
/// * `c` - Matrix C (m × n), row-major, stride `ldc`
/// * `m` - Rows of A and C
/// * `n` - Columns of B and C
/// * `k` - Columns of A, rows of B
///
/// # Panics
///
/// Panics if a slice is too short for its dimensions and stride.
#[allow(clippy::too_many_arguments)]
pub fn sgemm_naive(
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    m: usize,
    n: usize,
    k: usize,
    lda: usize,
    ldb: usize,
    ldc: usize,
    alpha: f32,
    zero_mode: bool,
) {
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0f32;
            for p in 0..k {
                sum += a[i * lda + p] * b[p * ldb + j];
            }
            let value = alpha * sum;
            let out = &mut c[i * ldc + j];
            *out = if zero_mode { value } else { *out + value };
        }
    }
}
