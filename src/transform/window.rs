//! Tile layout arithmetic shared by the engines, wrappers, and tests.

/// Round `v` up to the next multiple of `granule`.
pub const fn roundup(v: usize, granule: usize) -> usize {
    let rem = v % granule;
    if rem == 0 {
        v
    } else {
        v + granule - rem
    }
}

/// Destination length in elements for a transposed transform over
/// `[x0, xmax) x [k0, kmax)`: one `INT_BY`-wide block per started column
/// group, each `(kmax - k0) * INT_BY` elements.
pub const fn transposed_dst_len<const INT_BY: usize>(
    x0: usize,
    xmax: usize,
    k0: usize,
    kmax: usize,
) -> usize {
    roundup(xmax - x0, INT_BY) * (kmax - k0)
}

/// Destination length in elements for an untransposed interleave over rows
/// `[y0, ymax)` and columns `[k0, kmax)`. Every started `HEIGHT`-row block
/// is emitted at full size with the column count rounded up to `BLOCK`.
pub const fn interleaved_dst_len<const HEIGHT: usize, const BLOCK: usize>(
    y0: usize,
    ymax: usize,
    k0: usize,
    kmax: usize,
) -> usize {
    let row_blocks = roundup(ymax - y0, HEIGHT) / HEIGHT;
    row_blocks * HEIGHT * roundup(kmax - k0, BLOCK)
}

/// As [`interleaved_dst_len`], plus the `HEIGHT` i32 row sums appended to
/// each row block, expressed in single-byte output elements.
pub const fn interleaved_sums_dst_len<const HEIGHT: usize, const BLOCK: usize>(
    y0: usize,
    ymax: usize,
    k0: usize,
    kmax: usize,
) -> usize {
    let row_blocks = roundup(ymax - y0, HEIGHT) / HEIGHT;
    interleaved_dst_len::<HEIGHT, BLOCK>(y0, ymax, k0, kmax)
        + row_blocks * HEIGHT * std::mem::size_of::<i32>()
}
