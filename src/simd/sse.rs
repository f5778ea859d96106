//! SSE backend (`__m128`).
//!
//! SSE2 is part of the x86_64 baseline, so no `#[target_feature]` is needed
//! and the kernels can inline these freely. There is no FMA in SSE, so
//! `mul_add` is a separate multiply and add.

use super::F32x4;
use std::arch::x86_64::*;

#[allow(unused_unsafe)]
impl F32x4 for __m128 {
    #[inline(always)]
    fn zero() -> Self {
        unsafe { _mm_setzero_ps() }
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { _mm_set1_ps(value) }
    }

    #[inline(always)]
    unsafe fn load(src: *const f32) -> Self {
        unsafe { _mm_loadu_ps(src) }
    }

    #[inline(always)]
    unsafe fn store(self, dst: *mut f32) {
        unsafe { _mm_storeu_ps(dst, self) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { _mm_add_ps(self, rhs) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { _mm_mul_ps(self, rhs) }
    }

    #[inline(always)]
    fn mul_add(self, rhs: Self, acc: Self) -> Self {
        unsafe { _mm_add_ps(_mm_mul_ps(self, rhs), acc) }
    }

    #[inline(always)]
    fn interleave_low(self, rhs: Self) -> Self {
        unsafe { _mm_unpacklo_ps(self, rhs) }
    }

    #[inline(always)]
    fn interleave_high(self, rhs: Self) -> Self {
        unsafe { _mm_unpackhi_ps(self, rhs) }
    }

    #[inline(always)]
    fn concat_low(self, rhs: Self) -> Self {
        unsafe { _mm_movelh_ps(self, rhs) }
    }

    #[inline(always)]
    fn concat_high(self, rhs: Self) -> Self {
        // movehl(a, b) = [b2 b3 a2 a3]
        unsafe { _mm_movehl_ps(rhs, self) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self) };
        out
    }
}
