//! NEON move-block overrides for the same-type hot paths.
//!
//! Only the bulk-copy cases are vectorized here (f32 and u16 with an
//! interleave width that is a whole number of vectors); converting variants
//! stay on the scalar body, which the compiler autovectorizes well enough
//! for the widening casts.

use std::arch::aarch64::*;

/// f32 move-block, `INT_BY` a multiple of 4.
///
/// # Safety
///
/// Same contract as [`scalar::move_block`](crate::cpu_kernels::scalar::move_block);
/// additionally `INT_BY % 4 == 0`.
#[inline(always)]
pub unsafe fn move_block_f32<const INT_BY: usize, const ROWS: usize>(
    rows: &mut [*const f32; ROWS],
    out: *mut f32,
) {
    debug_assert!(INT_BY % 4 == 0);
    let mut out = out;
    for row in rows.iter_mut() {
        let mut inptr = *row;
        for _ in 0..INT_BY / 4 {
            vst1q_f32(out, vld1q_f32(inptr));
            inptr = inptr.add(4);
            out = out.add(4);
        }
        *row = inptr;
    }
}

/// u16 move-block, `INT_BY` a multiple of 8.
///
/// # Safety
///
/// Same contract as [`scalar::move_block`](crate::cpu_kernels::scalar::move_block);
/// additionally `INT_BY % 8 == 0`.
#[inline(always)]
pub unsafe fn move_block_u16<const INT_BY: usize, const ROWS: usize>(
    rows: &mut [*const u16; ROWS],
    out: *mut u16,
) {
    debug_assert!(INT_BY % 8 == 0);
    let mut out = out;
    for row in rows.iter_mut() {
        let mut inptr = *row;
        for _ in 0..INT_BY / 8 {
            vst1q_u16(out, vld1q_u16(inptr));
            inptr = inptr.add(8);
            out = out.add(8);
        }
        *row = inptr;
    }
}
