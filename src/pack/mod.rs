//! Packing B into the panel layout the microkernel streams.
//!
//! The packed buffer is a run of panels, each `PANEL_WIDTH` columns wide.
//! Inside a panel every k step holds `PANEL_WIDTH` contiguous floats, so the
//! kernel loads B with unit stride no matter how B was stored:
//!
//! ```text
//! B (k=3, n=20), panel width 16:
//!
//! panel 0: b[0][0..16]  | b[1][0..16]  | b[2][0..16]
//! panel 1: b[0][16..20] 0 0 ... 0 | b[1][16..20] 0 ... 0 | b[2][16..20] 0 ... 0
//! ```
//!
//! Available packers:
//! - `tile`: 16×4 SIMD transpose, the building block for transposed B
//! - `panel`: whole-block packers for B stored K×N or N×K

pub mod panel;
pub mod tile;

pub use panel::{copy_pack_b, packed_len, transpose_pack_b};
pub use tile::{pack_transpose_tile, pack_transpose_tile_checked};

use crate::simd::LANES;

/// Columns of C covered by one packed panel (four vectors).
pub const PANEL_WIDTH: usize = 4 * LANES;

/// Source rows consumed by one transpose tile. One tile fills a panel's width.
pub const PACK_TILE_ROWS: usize = PANEL_WIDTH;

/// Source columns (k steps) consumed by one transpose tile.
pub const PACK_TILE_COLS: usize = LANES;

/// Floats written by one transpose tile.
pub const PACKED_TILE_LEN: usize = PACK_TILE_ROWS * PACK_TILE_COLS;
