//! Portable move-block body.

use crate::traits::{PackElement, Promote};

/// Copy `INT_BY` elements from each of `ROWS` source rows into one
/// contiguous destination run, row 0 first, converting element-wise.
///
/// Each row pointer is advanced by `INT_BY`; the destination pointer is not
/// advanced (the caller steps it by `ldout` between column blocks).
///
/// # Safety
///
/// Every row pointer must be readable for `INT_BY` elements and `out` must
/// be writable for `ROWS * INT_BY` elements.
#[inline(always)]
pub unsafe fn move_block<const INT_BY: usize, const ROWS: usize, TIn, TOut>(
    rows: &mut [*const TIn; ROWS],
    out: *mut TOut,
) where
    TIn: Promote<TOut>,
    TOut: PackElement,
{
    let mut out = out;
    for row in rows.iter_mut() {
        let mut inptr = *row;
        for _ in 0..INT_BY {
            out.write((*inptr).promote());
            out = out.add(1);
            inptr = inptr.add(1);
        }
        *row = inptr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_rows_and_interleaves() {
        let r0 = [1u16, 2, 3, 4, 5];
        let r1 = [6u16, 7, 8, 9, 10];
        let mut rows = [r0.as_ptr(), r1.as_ptr()];
        let mut out = [0u16; 8];

        unsafe { move_block::<4, 2, u16, u16>(&mut rows, out.as_mut_ptr()) };

        assert_eq!(out, [1, 2, 3, 4, 6, 7, 8, 9]);
        assert_eq!(unsafe { rows[0].offset_from(r0.as_ptr()) }, 4);
        assert_eq!(unsafe { rows[1].offset_from(r1.as_ptr()) }, 4);
    }

    #[test]
    fn converts_while_copying() {
        let r0 = [250u8, 251, 252, 253];
        let mut rows = [r0.as_ptr()];
        let mut out = [0u16; 4];

        unsafe { move_block::<4, 1, u8, u16>(&mut rows, out.as_mut_ptr()) };

        assert_eq!(out, [250, 251, 252, 253]);
    }
}
