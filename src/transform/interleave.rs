//! Untransposed row interleave: packs `HEIGHT` source rows together in
//! column groups of `BLOCK`, zero-padding missing rows and the ragged tail
//! of the column window so every emitted tile has the fixed size the GEMM
//! micro-kernel expects.
//!
//! The quantized GEMM shapes additionally carry per-row i32 sums behind each
//! row block (used for the zero-point correction term); those go through the
//! `_sums` entry points, which append `HEIGHT` sums scaled by the caller's
//! multiplier after each tile.

use std::ptr;

use crate::traits::{PackElement, Promote, SumElement};

use super::window::{interleaved_dst_len, interleaved_sums_dst_len};

/// Pack one `HEIGHT`-row block. `rows` holds `active` live row pointers
/// (the rest may be null and are only ever padded); `width` is the true
/// column count. Advances `out` past the emitted tile.
#[inline(always)]
unsafe fn interleave_block<const HEIGHT: usize, const BLOCK: usize, TIn, TOut>(
    out: &mut *mut TOut,
    rows: &[*const TIn; HEIGHT],
    width: usize,
    active: usize,
) where
    TIn: Promote<TOut>,
    TOut: PackElement,
{
    let mut o = *out;
    let mut pos = 0;
    while pos < width {
        for (row, &inptr) in rows.iter().enumerate() {
            if row >= active {
                for _ in 0..BLOCK {
                    o.write(TOut::ZERO);
                    o = o.add(1);
                }
                continue;
            }
            for col in 0..BLOCK {
                if pos + col < width {
                    o.write((*inptr.add(pos + col)).promote());
                } else {
                    o.write(TOut::ZERO);
                }
                o = o.add(1);
            }
        }
        pos += BLOCK;
    }
    *out = o;
}

/// As [`interleave_block`], also accumulating each live row's elements into
/// `sums` (unpadded elements only).
#[inline(always)]
unsafe fn interleave_block_sums<const HEIGHT: usize, const BLOCK: usize, TIn, TOut>(
    out: &mut *mut TOut,
    rows: &[*const TIn; HEIGHT],
    width: usize,
    active: usize,
    sums: &mut [i32; HEIGHT],
) where
    TIn: SumElement + Promote<TOut>,
    TOut: PackElement,
{
    let mut o = *out;
    let mut pos = 0;
    while pos < width {
        for (row, &inptr) in rows.iter().enumerate() {
            if row >= active {
                for _ in 0..BLOCK {
                    o.write(TOut::ZERO);
                    o = o.add(1);
                }
                continue;
            }
            for col in 0..BLOCK {
                if pos + col < width {
                    let v = *inptr.add(pos + col);
                    sums[row] += v.to_i32();
                    o.write(v.promote());
                } else {
                    o.write(TOut::ZERO);
                }
                o = o.add(1);
            }
        }
        pos += BLOCK;
    }
    *out = o;
}

#[inline(always)]
unsafe fn row_pointers<const HEIGHT: usize, TIn>(
    input: *const TIn,
    ldin: usize,
    y: usize,
    k0: usize,
    active: usize,
) -> [*const TIn; HEIGHT] {
    let mut rows = [ptr::null::<TIn>(); HEIGHT];
    for (r, row) in rows.iter_mut().enumerate().take(active) {
        *row = input.add((y + r) * ldin + k0);
    }
    rows
}

/// Interleave rows `[y0, ymax)` over columns `[k0, kmax)` of a row-major
/// source with stride `ldin` into `HEIGHT`-row tiles at `out`.
///
/// Writes exactly `roundup(ymax-y0, HEIGHT) * roundup(kmax-k0, BLOCK)`
/// elements; rows past `ymax` within the last tile are zero.
///
/// # Safety
///
/// The window must lie inside the source buffer and `out` must be writable
/// for the full destination length. No bounds checks in release builds.
pub unsafe fn interleave<const HEIGHT: usize, const BLOCK: usize, TIn, TOut>(
    out: *mut TOut,
    input: *const TIn,
    ldin: usize,
    y0: usize,
    ymax: usize,
    k0: usize,
    kmax: usize,
) where
    TIn: Promote<TOut>,
    TOut: PackElement,
{
    debug_assert!(ymax >= y0 && kmax >= k0);

    let width = kmax - k0;
    let mut out = out;
    let mut y = y0;
    while y < ymax {
        let active = (ymax - y).min(HEIGHT);
        let rows = row_pointers::<HEIGHT, TIn>(input, ldin, y, k0, active);
        interleave_block::<HEIGHT, BLOCK, TIn, TOut>(&mut out, &rows, width, active);
        y += HEIGHT;
    }
}

/// [`interleave`] with row-sum integration: after each tile, `HEIGHT` i32
/// sums of that tile's live elements, scaled by `row_sum_multiplier`, are
/// written into the output stream (unaligned stores). A zero multiplier
/// skips the accumulation and writes zero sums.
///
/// # Safety
///
/// As [`interleave`], with the destination sized per
/// [`interleaved_sums_dst_len`]. `TOut` must be a single-byte type so the
/// sums slot is expressible in output elements.
pub unsafe fn interleave_sums<const HEIGHT: usize, const BLOCK: usize, TIn, TOut>(
    out: *mut TOut,
    input: *const TIn,
    ldin: usize,
    y0: usize,
    ymax: usize,
    k0: usize,
    kmax: usize,
    row_sum_multiplier: i32,
) where
    TIn: SumElement + Promote<TOut>,
    TOut: PackElement,
{
    debug_assert!(ymax >= y0 && kmax >= k0);
    debug_assert!(std::mem::size_of::<TOut>() == 1);

    let width = kmax - k0;
    let mut out = out;
    let mut y = y0;
    while y < ymax {
        let active = (ymax - y).min(HEIGHT);
        let rows = row_pointers::<HEIGHT, TIn>(input, ldin, y, k0, active);

        let mut sums = [0i32; HEIGHT];
        if row_sum_multiplier != 0 {
            interleave_block_sums::<HEIGHT, BLOCK, TIn, TOut>(
                &mut out, &rows, width, active, &mut sums,
            );
        } else {
            interleave_block::<HEIGHT, BLOCK, TIn, TOut>(&mut out, &rows, width, active);
        }

        let sums_ptr = out as *mut i32;
        for (i, s) in sums.iter().enumerate() {
            sums_ptr.add(i).write_unaligned(s * row_sum_multiplier);
        }
        out = sums_ptr.add(HEIGHT) as *mut TOut;

        y += HEIGHT;
    }
}

/// Safe front-end over [`interleave`].
pub fn pack_interleaved<const HEIGHT: usize, const BLOCK: usize, TIn, TOut>(
    dst: &mut [TOut],
    src: &[TIn],
    ldin: usize,
    y0: usize,
    ymax: usize,
    k0: usize,
    kmax: usize,
) where
    TIn: Promote<TOut>,
    TOut: PackElement,
{
    assert!(y0 <= ymax && k0 <= kmax, "malformed window");
    let dst_len = interleaved_dst_len::<HEIGHT, BLOCK>(y0, ymax, k0, kmax);
    assert!(dst.len() >= dst_len, "destination too small");

    if ymax == y0 {
        return;
    }
    if kmax == k0 {
        // Nothing to read, but started row blocks still have zero width.
        return;
    }
    assert!(
        (ymax - 1) * ldin + kmax <= src.len(),
        "window exceeds source"
    );

    unsafe {
        interleave::<HEIGHT, BLOCK, TIn, TOut>(
            dst.as_mut_ptr(),
            src.as_ptr(),
            ldin,
            y0,
            ymax,
            k0,
            kmax,
        )
    }
}

/// Safe front-end over [`interleave_sums`] for the quantized (8-bit) GEMM
/// operand shapes.
#[allow(clippy::too_many_arguments)]
pub fn pack_interleaved_sums<const HEIGHT: usize, const BLOCK: usize, TIn, TOut>(
    dst: &mut [TOut],
    src: &[TIn],
    ldin: usize,
    y0: usize,
    ymax: usize,
    k0: usize,
    kmax: usize,
    row_sum_multiplier: i32,
) where
    TIn: SumElement + Promote<TOut>,
    TOut: PackElement,
{
    assert!(y0 <= ymax && k0 <= kmax, "malformed window");
    assert!(
        std::mem::size_of::<TOut>() == 1,
        "row sums require a single-byte output type"
    );
    let dst_len = interleaved_sums_dst_len::<HEIGHT, BLOCK>(y0, ymax, k0, kmax);
    assert!(dst.len() >= dst_len, "destination too small");

    if ymax == y0 {
        return;
    }
    if kmax > k0 {
        assert!(
            (ymax - 1) * ldin + kmax <= src.len(),
            "window exceeds source"
        );
    }

    unsafe {
        interleave_sums::<HEIGHT, BLOCK, TIn, TOut>(
            dst.as_mut_ptr(),
            src.as_ptr(),
            ldin,
            y0,
            ymax,
            k0,
            kmax,
            row_sum_multiplier,
        )
    }
}
