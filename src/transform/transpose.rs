//! Blocked transpose/interleave: the GEMM operand-preparation core.
//!
//! `transpose_interleave` repacks a row-major window of the source matrix
//! into `INT_BY`-wide interleaved column blocks: block j holds columns
//! `x0 + INT_BY*j ..` for every row of the window, row-major within the
//! block, so the downstream micro-kernel streams one block per K step.
//! Ragged column counts are zero-padded to the full block width.
//!
//! Rows are consumed in groups of the largest available move-block fan-in
//! (4, then 2, then 1) to amortize row-pointer setup; the ragged-column
//! pass runs last over the whole row window, recomputing its base pointers
//! from the original arguments rather than the loop's running pointers.

use crate::cpu_kernels::scalar;
use crate::traits::{PackElement, Promote};

use super::window::transposed_dst_len;

/// Move-block capability: the innermost copy of `INT_BY` elements from each
/// of `ROWS` source rows into one contiguous destination run.
///
/// The default body is the portable scalar walk; same-type impls override it
/// with NEON bulk copies where the interleave width is a whole number of
/// vectors. Row pointers advance by `INT_BY` per call, the destination
/// pointer does not (the engine steps it by `ldout` between column blocks).
pub trait MoveBlock<TOut: PackElement>: Promote<TOut> {
    /// # Safety
    ///
    /// Every row pointer must be readable for `INT_BY` elements and `out`
    /// writable for `ROWS * INT_BY` elements.
    #[inline(always)]
    unsafe fn move_block<const INT_BY: usize, const ROWS: usize>(
        rows: &mut [*const Self; ROWS],
        out: *mut TOut,
    ) {
        scalar::move_block::<INT_BY, ROWS, Self, TOut>(rows, out)
    }
}

macro_rules! impl_move_block_scalar {
    ($($tin:ty => $tout:ty;)*) => {
        $(impl MoveBlock<$tout> for $tin {})*
    };
}

impl_move_block_scalar! {
    u8  => u8;
    i8  => i8;
    i16 => i16;
    u32 => u32;
    i32 => i32;
    half::f16  => half::f16;
    half::bf16 => half::bf16;
    // Widening variants; the scalar body converts in the copy loop.
    u8  => u16;
    u8  => i16;
    i8  => i16;
    u16 => u32;
    i16 => i32;
    half::f16  => f32;
    half::bf16 => f32;
}

impl MoveBlock<f32> for f32 {
    #[inline(always)]
    unsafe fn move_block<const INT_BY: usize, const ROWS: usize>(
        rows: &mut [*const f32; ROWS],
        out: *mut f32,
    ) {
        #[cfg(target_arch = "aarch64")]
        if INT_BY % 4 == 0 {
            return crate::cpu_kernels::neon::move_block_f32::<INT_BY, ROWS>(rows, out);
        }
        scalar::move_block::<INT_BY, ROWS, f32, f32>(rows, out)
    }
}

impl MoveBlock<u16> for u16 {
    #[inline(always)]
    unsafe fn move_block<const INT_BY: usize, const ROWS: usize>(
        rows: &mut [*const u16; ROWS],
        out: *mut u16,
    ) {
        #[cfg(target_arch = "aarch64")]
        if INT_BY % 8 == 0 {
            return crate::cpu_kernels::neon::move_block_u16::<INT_BY, ROWS>(rows, out);
        }
        scalar::move_block::<INT_BY, ROWS, u16, u16>(rows, out)
    }
}

/// Transpose/interleave the window `[x0, xmax) x [k0, kmax)` of a row-major
/// source with row stride `ldin` into `INT_BY`-wide interleaved blocks at
/// `out`.
///
/// Writes exactly `roundup(xmax - x0, INT_BY) * (kmax - k0)` elements.
/// Column-block j of the output starts at `j * (kmax - k0) * INT_BY`.
///
/// # Safety
///
/// The caller guarantees the window lies inside the source buffer and that
/// `out` is writable for the full destination length. No bounds checks are
/// performed in release builds.
pub unsafe fn transpose_interleave<const INT_BY: usize, TIn, TOut>(
    out: *mut TOut,
    input: *const TIn,
    ldin: usize,
    x0: usize,
    xmax: usize,
    k0: usize,
    kmax: usize,
) where
    TIn: MoveBlock<TOut>,
    TOut: PackElement,
{
    debug_assert!(xmax >= x0 && kmax >= k0);

    let nblocks = (xmax - x0) / INT_BY;
    // Per-row-group advance within one column block.
    let ldout = (kmax - k0) * INT_BY;

    let k = kmax - k0;
    let mut kbase = 0;

    while k - kbase >= 4 {
        let inptr_base = input.add(x0 + (k0 + kbase) * ldin);
        let mut rows: [*const TIn; 4] = [
            inptr_base,
            inptr_base.add(ldin),
            inptr_base.add(2 * ldin),
            inptr_base.add(3 * ldin),
        ];
        let mut outptr = out.add(kbase * INT_BY);

        for _ in 0..nblocks {
            TIn::move_block::<INT_BY, 4>(&mut rows, outptr);
            outptr = outptr.add(ldout);
        }
        kbase += 4;
    }

    // 1-3 rows left over; largest fan-in first.
    if k > kbase {
        let inptr_base = input.add(x0 + (k0 + kbase) * ldin);
        let mut outptr = out.add(kbase * INT_BY);

        match k - kbase {
            3 => {
                let mut rows2: [*const TIn; 2] = [inptr_base, inptr_base.add(ldin)];
                let mut row1: [*const TIn; 1] = [inptr_base.add(2 * ldin)];
                for _ in 0..nblocks {
                    TIn::move_block::<INT_BY, 2>(&mut rows2, outptr);
                    TIn::move_block::<INT_BY, 1>(&mut row1, outptr.add(2 * INT_BY));
                    outptr = outptr.add(ldout);
                }
            }
            2 => {
                let mut rows2: [*const TIn; 2] = [inptr_base, inptr_base.add(ldin)];
                for _ in 0..nblocks {
                    TIn::move_block::<INT_BY, 2>(&mut rows2, outptr);
                    outptr = outptr.add(ldout);
                }
            }
            _ => {
                let mut row1: [*const TIn; 1] = [inptr_base];
                for _ in 0..nblocks {
                    TIn::move_block::<INT_BY, 1>(&mut row1, outptr);
                    outptr = outptr.add(ldout);
                }
            }
        }
    }

    // Ragged column remainder: element-at-a-time, zero-filling the unused
    // lanes of the final block. Base pointers come from the original
    // arguments, not the loop state above.
    let overflow = (xmax - x0) % INT_BY;
    if overflow > 0 {
        let mut outptr = out.add(nblocks * ldout);
        for row in 0..k {
            let mut inptr = input.add((xmax - overflow) + (k0 + row) * ldin);
            for lane in 0..INT_BY {
                if lane < overflow {
                    outptr.write((*inptr).promote());
                    inptr = inptr.add(1);
                } else {
                    outptr.write(TOut::ZERO);
                }
                outptr = outptr.add(1);
            }
        }
    }
}

/// Safe front-end over [`transpose_interleave`].
///
/// Asserts window ordering, destination length, and that the window lies
/// within `src` for the given row stride. Callers that have already proven
/// the contract can use the raw engine directly.
pub fn pack_transposed<const INT_BY: usize, TIn, TOut>(
    dst: &mut [TOut],
    src: &[TIn],
    ldin: usize,
    x0: usize,
    xmax: usize,
    k0: usize,
    kmax: usize,
) where
    TIn: MoveBlock<TOut>,
    TOut: PackElement,
{
    assert!(x0 <= xmax && k0 <= kmax, "malformed window");
    let dst_len = transposed_dst_len::<INT_BY>(x0, xmax, k0, kmax);
    assert!(dst.len() >= dst_len, "destination too small");

    if xmax == x0 || kmax == k0 {
        return;
    }
    assert!(
        (kmax - 1) * ldin + xmax <= src.len(),
        "window exceeds source"
    );

    unsafe {
        transpose_interleave::<INT_BY, TIn, TOut>(
            dst.as_mut_ptr(),
            src.as_ptr(),
            ldin,
            x0,
            xmax,
            k0,
            kmax,
        )
    }
}
