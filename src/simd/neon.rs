//! NEON backend (`float32x4_t`), baseline on aarch64.

use super::F32x4;
use std::arch::aarch64::*;

#[allow(unused_unsafe)]
impl F32x4 for float32x4_t {
    #[inline(always)]
    fn zero() -> Self {
        unsafe { vdupq_n_f32(0.0) }
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { vdupq_n_f32(value) }
    }

    #[inline(always)]
    unsafe fn load(src: *const f32) -> Self {
        unsafe { vld1q_f32(src) }
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f32) {
        unsafe { vst1q_f32(dst, self) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { vaddq_f32(self, rhs) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { vmulq_f32(self, rhs) }
    }

    #[inline(always)]
    fn mul_add(self, rhs: Self, acc: Self) -> Self {
        unsafe { vfmaq_f32(acc, self, rhs) }
    }

    #[inline(always)]
    fn interleave_low(self, rhs: Self) -> Self {
        unsafe { vzip1q_f32(self, rhs) }
    }

    #[inline(always)]
    fn interleave_high(self, rhs: Self) -> Self {
        unsafe { vzip2q_f32(self, rhs) }
    }

    #[inline(always)]
    fn concat_low(self, rhs: Self) -> Self {
        unsafe { vcombine_f32(vget_low_f32(self), vget_low_f32(rhs)) }
    }

    #[inline(always)]
    fn concat_high(self, rhs: Self) -> Self {
        unsafe { vcombine_f32(vget_high_f32(self), vget_high_f32(rhs)) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { vst1q_f32(out.as_mut_ptr(), self) };
        out
    }
}
