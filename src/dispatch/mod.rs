//! Specialization table mapping `(interleave width, sub-block width,
//! transposed, TIn, TOut)` to a monomorphized transform.
//!
//! The table is static: every entry is a type-erased shim around one
//! monomorphization of the generic engines, generated by the `*_entry!`
//! macros below. Lookup is a linear scan over a handful of entries; there
//! is no runtime registration and no allocation.
//!
//! Redirect entries reuse a narrow-type monomorphization for bit-compatible
//! wide types (12-wide u32 runs as 24-wide u16), preserving the block byte
//! count.

use half::{bf16, f16};
use thiserror::Error;

use crate::cpu_kernels::get_isa_level;
use crate::traits::PackElement;
use crate::types::DType;

/// Dispatch key for a transform instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformKey {
    /// Interleave width (`INT_BY` for transposed, `HEIGHT` for untransposed).
    pub int_by: usize,
    /// Sub-block width (1 for the transposed transforms).
    pub block_by: usize,
    pub transposed: bool,
    pub tin: DType,
    pub tout: DType,
}

impl TransformKey {
    pub const fn transposed(int_by: usize, block_by: usize, tin: DType, tout: DType) -> Self {
        Self { int_by, block_by, transposed: true, tin, tout }
    }

    pub const fn interleaved(height: usize, block_by: usize, tin: DType, tout: DType) -> Self {
        Self { int_by: height, block_by, transposed: false, tin, tout }
    }
}

/// Type-erased transform entry point.
///
/// Arguments: `(out, in, ldin, p0, p1, k0, kmax)` where `p0/p1` are the
/// column window (`x0/xmax`) for transposed entries and the row window
/// (`y0/ymax`) for untransposed ones. Pointers are element-typed per the
/// entry's key; strides and windows are in elements of `tin`.
pub type TransformFn =
    unsafe fn(*mut u8, *const u8, usize, usize, usize, usize, usize);

struct Entry {
    key: TransformKey,
    func: TransformFn,
}

macro_rules! transposed_entry {
    ($int_by:literal, $tin:ident => $tout:ident) => {
        paste::paste! {{
            unsafe fn [<trans_ $int_by _ $tin _ $tout>](
                out: *mut u8,
                input: *const u8,
                ldin: usize,
                x0: usize,
                xmax: usize,
                k0: usize,
                kmax: usize,
            ) {
                crate::transform::transpose_interleave::<$int_by, $tin, $tout>(
                    out.cast(),
                    input.cast(),
                    ldin,
                    x0,
                    xmax,
                    k0,
                    kmax,
                )
            }
            Entry {
                key: TransformKey::transposed(
                    $int_by,
                    1,
                    <$tin as PackElement>::DTYPE,
                    <$tout as PackElement>::DTYPE,
                ),
                func: [<trans_ $int_by _ $tin _ $tout>],
            }
        }}
    };
}

macro_rules! redirect_entry {
    ($wide_by:literal, $wide:ident via $narrow_by:literal x $narrow:ident) => {
        paste::paste! {{
            unsafe fn [<trans_ $wide_by _ $wide _redirect>](
                out: *mut u8,
                input: *const u8,
                ldin: usize,
                x0: usize,
                xmax: usize,
                k0: usize,
                kmax: usize,
            ) {
                crate::transform::redirect_transposed::<$wide_by, $narrow_by, $wide, $narrow>(
                    out.cast(),
                    input.cast(),
                    ldin,
                    x0,
                    xmax,
                    k0,
                    kmax,
                )
            }
            Entry {
                key: TransformKey::transposed(
                    $wide_by,
                    1,
                    <$wide as PackElement>::DTYPE,
                    <$wide as PackElement>::DTYPE,
                ),
                func: [<trans_ $wide_by _ $wide _redirect>],
            }
        }}
    };
}

macro_rules! interleaved_entry {
    ($height:literal / $block:literal, $tin:ident => $tout:ident) => {
        paste::paste! {{
            unsafe fn [<inter_ $height x $block _ $tin _ $tout>](
                out: *mut u8,
                input: *const u8,
                ldin: usize,
                y0: usize,
                ymax: usize,
                k0: usize,
                kmax: usize,
            ) {
                crate::transform::interleave::<$height, $block, $tin, $tout>(
                    out.cast(),
                    input.cast(),
                    ldin,
                    y0,
                    ymax,
                    k0,
                    kmax,
                )
            }
            Entry {
                key: TransformKey::interleaved(
                    $height,
                    $block,
                    <$tin as PackElement>::DTYPE,
                    <$tout as PackElement>::DTYPE,
                ),
                func: [<inter_ $height x $block _ $tin _ $tout>],
            }
        }}
    };
}

// Mirrors the a64 instantiation list: transposed B-operand transforms at the
// strategy widths, widening variants for kernels that compute in a wider
// type, redirects for the bit-compatible 32-bit integers, and the height-8
// A-operand interleaves (block 2/4 for the dot-product and mmla shapes).
static TRANSFORMS: &[Entry] = &[
    transposed_entry!(12, f32 => f32),
    transposed_entry!(24, f16 => f16),
    transposed_entry!(24, u16 => u16),
    transposed_entry!(16, u8 => u8),
    transposed_entry!(16, i8 => i8),
    transposed_entry!(16, u8 => u16),
    transposed_entry!(16, i8 => i16),
    transposed_entry!(12, f16 => f32),
    redirect_entry!(12, u32 via 24 x u16),
    redirect_entry!(12, i32 via 24 x u16),
    interleaved_entry!(8 / 1, f32 => f32),
    interleaved_entry!(8 / 1, f16 => f16),
    interleaved_entry!(8 / 1, u16 => u16),
    interleaved_entry!(8 / 1, f16 => f32),
    interleaved_entry!(8 / 1, bf16 => f32),
    interleaved_entry!(8 / 2, f32 => f32),
    interleaved_entry!(8 / 2, bf16 => bf16),
    interleaved_entry!(8 / 4, u8 => u8),
    interleaved_entry!(8 / 4, i8 => i8),
    interleaved_entry!(8 / 4, bf16 => bf16),
];

/// Look up the transform registered for `key`.
pub fn lookup(key: &TransformKey) -> Option<TransformFn> {
    TRANSFORMS
        .iter()
        .find(|entry| entry.key == *key)
        .map(|entry| entry.func)
}

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("no transform registered for {0:?}")]
    UnsupportedTransform(TransformKey),
}

/// Resolved transform handle.
///
/// Construction performs the table lookup once; `run` is a direct call
/// through the stored function pointer.
pub struct Transformer {
    key: TransformKey,
    func: TransformFn,
}

impl Transformer {
    pub fn new(key: TransformKey) -> Result<Self, KernelError> {
        match lookup(&key) {
            Some(func) => {
                log::debug!(
                    "selected {} transform {}x{} {} -> {} ({} isa)",
                    if key.transposed { "transposed" } else { "interleaved" },
                    key.int_by,
                    key.block_by,
                    key.tin,
                    key.tout,
                    get_isa_level(),
                );
                Ok(Self { key, func })
            }
            None => Err(KernelError::UnsupportedTransform(key)),
        }
    }

    pub fn key(&self) -> &TransformKey {
        &self.key
    }

    /// Run the resolved transform.
    ///
    /// # Safety
    ///
    /// Same contract as the underlying engine: the window must lie inside
    /// the source buffer, the destination must be sized for the key's
    /// layout, and the pointers must match the key's element types.
    #[allow(clippy::too_many_arguments)]
    #[inline(always)]
    pub unsafe fn run(
        &self,
        out: *mut u8,
        input: *const u8,
        ldin: usize,
        p0: usize,
        p1: usize,
        k0: usize,
        kmax: usize,
    ) {
        (self.func)(out, input, ldin, p0, p1, k0, kmax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::transposed_dst_len;

    #[test]
    fn lookup_hits_registered_entries() {
        assert!(lookup(&TransformKey::transposed(12, 1, DType::F32, DType::F32)).is_some());
        assert!(lookup(&TransformKey::interleaved(8, 4, DType::I8, DType::I8)).is_some());
        assert!(lookup(&TransformKey::transposed(12, 1, DType::U32, DType::U32)).is_some());
    }

    #[test]
    fn unsupported_key_is_an_error() {
        let key = TransformKey::transposed(7, 1, DType::F32, DType::F32);
        assert!(matches!(
            Transformer::new(key),
            Err(KernelError::UnsupportedTransform(_))
        ));
    }

    #[test]
    fn erased_call_matches_typed_call() {
        let src: Vec<f32> = (0..60).map(|v| v as f32).collect();
        let len = transposed_dst_len::<12>(0, 15, 0, 4);

        let mut via_table = vec![0.0f32; len];
        let tf = Transformer::new(TransformKey::transposed(12, 1, DType::F32, DType::F32))
            .expect("registered");
        unsafe {
            tf.run(
                via_table.as_mut_ptr().cast(),
                src.as_ptr().cast(),
                15,
                0,
                15,
                0,
                4,
            );
        }

        let mut direct = vec![0.0f32; len];
        crate::transform::pack_transposed::<12, f32, f32>(&mut direct, &src, 15, 0, 15, 0, 4);

        assert_eq!(via_table, direct);
    }

    #[test]
    fn redirected_u32_matches_reinterpreted_u16() {
        let src: Vec<u32> = (0..48u32).map(|v| v.wrapping_mul(0x0101_0101)).collect();
        let len = transposed_dst_len::<12>(0, 12, 0, 4);

        let mut wide = vec![0u32; len];
        let tf = Transformer::new(TransformKey::transposed(12, 1, DType::U32, DType::U32))
            .expect("registered");
        unsafe {
            tf.run(wide.as_mut_ptr().cast(), src.as_ptr().cast(), 12, 0, 12, 0, 4);
        }

        let src_u16: &[u16] =
            unsafe { std::slice::from_raw_parts(src.as_ptr().cast(), src.len() * 2) };
        let mut narrow = vec![0u16; len * 2];
        crate::transform::pack_transposed::<24, u16, u16>(&mut narrow, src_u16, 24, 0, 24, 0, 4);

        let wide_as_u16: &[u16] =
            unsafe { std::slice::from_raw_parts(wide.as_ptr().cast(), wide.len() * 2) };
        assert_eq!(wide_as_u16, &narrow[..]);
    }
}
