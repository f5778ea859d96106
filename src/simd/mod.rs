//! 4-lane f32 vector abstraction shared by the packer and the microkernel.
//!
//! Every backend is 128 bits wide, so `LANES` is 4 everywhere and the
//! packed panel width (`4 * LANES`) comes out as 16 columns. Which backend
//! runs is decided at compile time: kernels are generic over [`F32x4`] and
//! [`NativeF32x4`] picks the best one for the target architecture.
//!
//! Available backends:
//! - `sse`: `__m128`, baseline on every x86_64 CPU
//! - `neon`: `float32x4_t` with fused multiply-add on aarch64
//! - `portable`: `wide::f32x4`, works everywhere

#[cfg(target_arch = "aarch64")]
pub mod neon;
pub mod portable;
#[cfg(target_arch = "x86_64")]
pub mod sse;

pub use portable::PortableF32x4;

/// f32 lanes per vector register.
pub const LANES: usize = 4;

/// Best backend for the compile target.
#[cfg(target_arch = "x86_64")]
pub type NativeF32x4 = std::arch::x86_64::__m128;

/// Best backend for the compile target.
#[cfg(target_arch = "aarch64")]
pub type NativeF32x4 = std::arch::aarch64::float32x4_t;

/// Best backend for the compile target.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub type NativeF32x4 = PortableF32x4;

/// A vector of four f32 lanes.
///
/// Lane 0 is the element at the lowest address after a [`load`](F32x4::load).
/// The four shuffles are the only primitives the transpose packer uses:
///
/// ```text
/// a = [a0 a1 a2 a3], b = [b0 b1 b2 b3]
///
/// interleave_low(a, b)  = [a0 b0 a1 b1]
/// interleave_high(a, b) = [a2 b2 a3 b3]
/// concat_low(a, b)      = [a0 a1 b0 b1]
/// concat_high(a, b)     = [a2 a3 b2 b3]
/// ```
pub trait F32x4: Copy {
    /// All lanes zero.
    fn zero() -> Self;

    /// All lanes set to `value`.
    fn splat(value: f32) -> Self;

    /// Unaligned load of four consecutive floats.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading 4 f32 values.
    unsafe fn load(src: *const f32) -> Self;

    /// Unaligned store of all four lanes.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writing 4 f32 values.
    unsafe fn store(self, dst: *mut f32);

    fn add(self, rhs: Self) -> Self;

    fn mul(self, rhs: Self) -> Self;

    /// `self * rhs + acc`. Fused where the backend has a fused instruction.
    fn mul_add(self, rhs: Self, acc: Self) -> Self;

    fn interleave_low(self, rhs: Self) -> Self;

    fn interleave_high(self, rhs: Self) -> Self;

    fn concat_low(self, rhs: Self) -> Self;

    fn concat_high(self, rhs: Self) -> Self;

    fn to_array(self) -> [f32; 4];
}
