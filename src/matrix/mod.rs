//! Reference implementations and matrix utilities.
//!
//! These provide the correctness baseline the packed kernel is checked
//! against, and the scalar transpose used to prepare and un-pack tiles.

pub mod naive;
pub mod transpose;
