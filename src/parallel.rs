//! Parallel operand packing.
//!
//! The transposed layout is block-major: each `INT_BY`-wide column block
//! occupies its own contiguous `(kmax - k0) * INT_BY` destination run and
//! reads only its own columns. Splitting the column window at block
//! boundaries therefore yields fully independent sub-transforms over
//! disjoint destination chunks, which is the parallelism the engine's
//! contract permits.

use rayon::prelude::*;

use crate::traits::PackElement;
use crate::transform::{transpose_interleave, transposed_dst_len, MoveBlock};

/// [`pack_transposed`](crate::transform::pack_transposed) with the column
/// window split across the rayon pool.
///
/// Output is identical to the sequential call; only the ragged remainder
/// (if any) lands in the final chunk.
pub fn pack_transposed_par<const INT_BY: usize, TIn, TOut>(
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

    let ldout = (kmax - k0) * INT_BY;
    let total_blocks = (xmax - x0).div_ceil(INT_BY);
    let blocks_per_chunk = total_blocks
        .div_ceil(rayon::current_num_threads())
        .max(1);

    dst[..dst_len]
        .par_chunks_mut(blocks_per_chunk * ldout)
        .enumerate()
        .for_each(|(i, chunk)| {
            let cx0 = x0 + i * blocks_per_chunk * INT_BY;
            let cxmax = (cx0 + blocks_per_chunk * INT_BY).min(xmax);
            unsafe {
                transpose_interleave::<INT_BY, TIn, TOut>(
                    chunk.as_mut_ptr(),
                    src.as_ptr(),
                    ldin,
                    cx0,
                    cxmax,
                    k0,
                    kmax,
                )
            }
        });
}
