//! SIMD microkernels for the inner loop of SGEMM.
//!
//! These compute row tiles of `C := alpha*A*B` or `C += alpha*A*B` against
//! a packed B (see [`crate::pack`]). A row tile is 4, 2 or 1 rows high,
//! whichever is the largest that still fits; the caller advances its row
//! cursor by the returned row count.
//!
//! - `dispatch`: tile-height selection and the public entry point
//! - `row_tile`: the microkernel, one generic body for every tile height

pub mod dispatch;
mod row_tile;

pub use dispatch::{ROW_TILE_WIDTHS, compute_row_tile, select_tile_width};
