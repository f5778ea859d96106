//! Portable backend on top of `wide::f32x4`.

use super::F32x4;
use wide::f32x4;

/// Architecture-independent 4-lane vector.
pub type PortableF32x4 = f32x4;

impl F32x4 for f32x4 {
    #[inline(always)]
    fn zero() -> Self {
        f32x4::ZERO
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        f32x4::splat(value)
    }

    #[inline(always)]
    unsafe fn load(src: *const f32) -> Self {
        // SAFETY: caller guarantees 4 readable floats; no alignment required.
        f32x4::new(unsafe { src.cast::<[f32; 4]>().read_unaligned() })
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f32) {
        // SAFETY: caller guarantees 4 writable floats.
        unsafe { dst.cast::<[f32; 4]>().write_unaligned(f32x4::to_array(self)) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }

    #[inline(always)]
    fn mul_add(self, rhs: Self, acc: Self) -> Self {
        f32x4::mul_add(self, rhs, acc)
    }

    #[inline(always)]
    fn interleave_low(self, rhs: Self) -> Self {
        let [a0, a1, _, _] = f32x4::to_array(self);
        let [b0, b1, _, _] = f32x4::to_array(rhs);
        f32x4::new([a0, b0, a1, b1])
    }

    #[inline(always)]
    fn interleave_high(self, rhs: Self) -> Self {
        let [_, _, a2, a3] = f32x4::to_array(self);
        let [_, _, b2, b3] = f32x4::to_array(rhs);
        f32x4::new([a2, b2, a3, b3])
    }

    #[inline(always)]
    fn concat_low(self, rhs: Self) -> Self {
        let [a0, a1, _, _] = f32x4::to_array(self);
        let [b0, b1, _, _] = f32x4::to_array(rhs);
        f32x4::new([a0, a1, b0, b1])
    }

    #[inline(always)]
    fn concat_high(self, rhs: Self) -> Self {
        let [_, _, a2, a3] = f32x4::to_array(self);
        let [_, _, b2, b3] = f32x4::to_array(rhs);
        f32x4::new([a2, a3, b2, b3])
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        f32x4::to_array(self)
    }
}
