//! tilepack-kernels: GEMM operand-preparation tile transforms.
//!
//! This crate is the packing layer that sits between a row-major source
//! matrix and a blocked GEMM micro-kernel:
//!
//! - **Transposed transforms** repack a `[x0, xmax) x [k0, kmax)` window
//!   into `INT_BY`-wide interleaved column blocks (the B operand).
//! - **Untransposed interleaves** pack `HEIGHT` rows together along the K
//!   window in `BLOCK`-column groups (the A operand), with optional i32
//!   row-sum integration for the quantized kernels.
//! - **Ragged edges** (dimensions that are not a multiple of the block
//!   granularity) are zero-padded so every emitted tile has the fixed size
//!   the micro-kernel expects.
//!
//! One generic engine serves every element-type pair through the
//! [`Promote`] conversion trait; the [`MoveBlock`] seam lets same-type hot
//! paths drop to NEON bulk copies on aarch64. The [`dispatch`] table maps
//! runtime `(width, block, transposed, type)` keys onto the monomorphized
//! entry points, including byte-preserving redirects that serve the 32-bit
//! integer types through the 16-bit code path.
//!
//! # Quick start
//!
//! ```
//! use tilepack_kernels::{pack_transposed, transposed_dst_len};
//!
//! // 2x6 u16 source, interleave width 4.
//! let src: [u16; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
//! let mut tile = vec![0u16; transposed_dst_len::<4>(0, 6, 0, 2)];
//! pack_transposed::<4, u16, u16>(&mut tile, &src, 6, 0, 6, 0, 2);
//! assert_eq!(tile, [1, 2, 3, 4, 7, 8, 9, 10, 5, 6, 0, 0, 11, 12, 0, 0]);
//! ```
//!
//! The engines are pure, allocation-free, and hold no state between calls;
//! concurrency is the caller's business, with [`pack_transposed_par`]
//! provided for the common disjoint-destination split.

pub mod cpu_kernels;
pub mod dispatch;
pub mod parallel;
pub mod traits;
pub mod transform;
pub mod types;

pub use cpu_kernels::{get_isa_level, IsaLevel};
pub use dispatch::{lookup, KernelError, TransformFn, TransformKey, Transformer};
pub use parallel::pack_transposed_par;
pub use traits::{PackElement, Promote, SumElement};
pub use transform::{
    interleave, interleave_sums, interleaved_dst_len, interleaved_sums_dst_len,
    pack_interleaved, pack_interleaved_sums, pack_transposed, redirect_transposed, roundup,
    transpose_interleave, transposed_dst_len, MoveBlock,
};
pub use types::DType;
