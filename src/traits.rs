//! Element traits for the packing kernels.
//!
//! `PackElement` is the per-type surface the engines need (a zero value for
//! padding and a runtime tag for dispatch). `Promote` expresses the widening
//! conversions applied element-wise by mixed-type transforms; identity
//! promotions make the same-type transforms fall out of the one generic
//! engine. Compile-time monomorphization, zero runtime overhead.

use half::{bf16, f16};

use crate::types::DType;

/// Element type a transform can read or write.
pub trait PackElement: Copy + Send + Sync + 'static {
    /// Value written into padded lanes and padded rows.
    const ZERO: Self;
    /// Runtime tag matching this type.
    const DTYPE: DType;
}

macro_rules! impl_pack_element {
    ($($ty:ty => $tag:ident, $zero:expr;)*) => {
        $(
            impl PackElement for $ty {
                const ZERO: Self = $zero;
                const DTYPE: DType = DType::$tag;
            }
        )*
    };
}

impl_pack_element! {
    u8   => U8,   0;
    i8   => I8,   0;
    u16  => U16,  0;
    i16  => I16,  0;
    u32  => U32,  0;
    i32  => I32,  0;
    f16  => F16,  f16::ZERO;
    bf16 => BF16, bf16::ZERO;
    f32  => F32,  0.0;
}

/// Element-wise numeric promotion from `Self` to `T`.
///
/// Integer widenings are bit-exact; `f16`/`bf16` to `f32` are exact because
/// every half-precision value is representable in single precision.
pub trait Promote<T: PackElement>: PackElement {
    fn promote(self) -> T;
}

/// Every type promotes to itself (the same-type transform case).
impl<T: PackElement> Promote<T> for T {
    #[inline(always)]
    fn promote(self) -> T {
        self
    }
}

macro_rules! impl_promote {
    ($($src:ty => $dst:ty, |$v:ident| $conv:expr;)*) => {
        $(
            impl Promote<$dst> for $src {
                #[inline(always)]
                fn promote(self) -> $dst {
                    let $v = self;
                    $conv
                }
            }
        )*
    };
}

impl_promote! {
    u8   => u16, |v| v as u16;
    u8   => i16, |v| v as i16;
    i8   => i16, |v| v as i16;
    u16  => u32, |v| v as u32;
    i16  => i32, |v| v as i32;
    f16  => f32, |v| v.to_f32();
    bf16 => f32, |v| v.to_f32();
}

/// Integer input types whose row sums are accumulated in `i32`.
pub trait SumElement: PackElement {
    fn to_i32(self) -> i32;
}

macro_rules! impl_sum_element {
    ($($ty:ty),*) => {
        $(
            impl SumElement for $ty {
                #[inline(always)]
                fn to_i32(self) -> i32 {
                    self as i32
                }
            }
        )*
    };
}

impl_sum_element!(u8, i8, u16, i16);
