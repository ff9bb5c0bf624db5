//! Tile transform engines: the operand-preparation layer feeding the GEMM
//! micro-kernels.
//!
//! Two layouts are produced:
//!
//! - [`transpose_interleave`] / [`pack_transposed`]: column blocks of
//!   `INT_BY` consecutive columns, all rows of the window interleaved
//!   row-major within each block (the "B" operand of a blocked GEMM).
//! - [`interleave`] / [`pack_interleaved`]: row blocks of `HEIGHT`
//!   consecutive rows walked along the K window in `BLOCK`-column groups
//!   (the "A" operand), optionally with integrated row sums for the
//!   quantized kernels.
//!
//! Both engines are pure, allocation-free, and hold no state between calls;
//! ragged edges are zero-padded so every emitted tile has its fixed size.

pub mod interleave;
pub mod redirect;
pub mod transpose;
pub mod window;

pub use interleave::{
    interleave, interleave_sums, pack_interleaved, pack_interleaved_sums,
};
pub use redirect::redirect_transposed;
pub use transpose::{pack_transposed, transpose_interleave, MoveBlock};
pub use window::{
    interleaved_dst_len, interleaved_sums_dst_len, roundup, transposed_dst_len,
};
