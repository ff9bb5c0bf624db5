//! Byte-count-preserving redirects.
//!
//! A transposed transform over a wide element type is bit-identical to the
//! same transform over `ratio` narrow elements per wide element, provided
//! the interleave width scales by the same ratio. Reusing the narrow code
//! path this way keeps one monomorphization serving every bit-compatible
//! type (e.g. 12-wide u32 runs as 24-wide u16).
//!
//! The column window and stride are expressed in elements, so `ldin`, `x0`
//! and `xmax` scale by the ratio; the row window does not, since rows are
//! never reinterpreted.

use crate::traits::PackElement;

use super::transpose::{transpose_interleave, MoveBlock};

/// Run the `WIDE_BY`-wide transform over `Wide` elements as the `NARROW_BY`-
/// wide transform over `Narrow` elements.
///
/// # Safety
///
/// Same contract as [`transpose_interleave`] for the wide-typed window.
/// `NARROW_BY * size_of::<Narrow>()` must equal `WIDE_BY * size_of::<Wide>()`
/// and `size_of::<Wide>()` must be a multiple of `size_of::<Narrow>()`.
pub unsafe fn redirect_transposed<const WIDE_BY: usize, const NARROW_BY: usize, Wide, Narrow>(
    out: *mut Wide,
    input: *const Wide,
    ldin: usize,
    x0: usize,
    xmax: usize,
    k0: usize,
    kmax: usize,
) where
    Wide: PackElement,
    Narrow: MoveBlock<Narrow>,
{
    debug_assert!(std::mem::size_of::<Wide>() % std::mem::size_of::<Narrow>() == 0);
    debug_assert!(
        NARROW_BY * std::mem::size_of::<Narrow>() == WIDE_BY * std::mem::size_of::<Wide>(),
        "redirect must preserve the block byte count"
    );

    let ratio = std::mem::size_of::<Wide>() / std::mem::size_of::<Narrow>();

    transpose_interleave::<NARROW_BY, Narrow, Narrow>(
        out as *mut Narrow,
        input as *const Narrow,
        ldin * ratio,
        x0 * ratio,
        xmax * ratio,
        k0,
        kmax,
    )
}
