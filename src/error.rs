//! Error types for the safe packing and driver entry points.
//!
//! The kernels themselves never return errors; their preconditions are
//! documented under `# Safety` and checked with `debug_assert!` only.

use thiserror::Error;

/// Errors reported by the slice-based wrappers around the kernels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SgemmError {
    /// The transpose packer only handles 16×4 tiles.
    #[error("unsupported tile shape {rows}x{cols}: the transpose packer handles exactly 16x4")]
    UnsupportedShape { rows: usize, cols: usize },

    /// A slice is shorter than its dimensions and stride require.
    #[error("{operand}: buffer too small, need {needed} elements but got {actual}")]
    BufferTooSmall {
        operand: &'static str,
        needed: usize,
        actual: usize,
    },

    /// A leading dimension is smaller than the row it has to step over.
    #[error("{operand}: stride {stride} is smaller than row length {min}")]
    StrideTooSmall {
        operand: &'static str,
        stride: usize,
        min: usize,
    },
}

/// Result type for the safe entry points.
pub type Result<T> = std::result::Result<T, SgemmError>;

/// Number of elements a row-major `rows × cols` matrix with stride `ld` spans.
///
/// The last row only needs `cols` elements, not a full stride. On overflow
/// this returns `usize::MAX`, which no `f32` slice can reach, so the shape
/// fails [`check_len`].
pub(crate) fn required_len(rows: usize, cols: usize, ld: usize) -> usize {
    if rows == 0 || cols == 0 {
        0
    } else {
        (rows - 1)
            .checked_mul(ld)
            .and_then(|len| len.checked_add(cols))
            .unwrap_or(usize::MAX)
    }
}

pub(crate) fn check_stride(operand: &'static str, stride: usize, min: usize) -> Result<()> {
    if stride < min {
        return Err(SgemmError::StrideTooSmall {
            operand,
            stride,
            min,
        });
    }
    Ok(())
}

pub(crate) fn check_len(operand: &'static str, needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(SgemmError::BufferTooSmall {
            operand,
            needed,
            actual,
        });
    }
    Ok(())
}
