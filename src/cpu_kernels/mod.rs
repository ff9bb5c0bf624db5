//! CPU move-block backends and runtime ISA reporting.
//!
//! The move-block primitive (copy `INT_BY` elements from each of `ROWS`
//! source rows into one contiguous destination run, converting on the way)
//! has one portable body in [`scalar`] and aarch64 overrides in [`neon`].
//! Selection happens at monomorphization time through the
//! [`MoveBlock`](crate::transform::MoveBlock) trait; `IsaLevel` exists so the
//! dispatch layer can report which path a transform resolved to.

pub mod scalar;

#[cfg(target_arch = "aarch64")]
pub mod neon;

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsaLevel {
    Scalar,
    Neon,
}

impl std::fmt::Display for IsaLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar => f.write_str("scalar"),
            Self::Neon => f.write_str("neon"),
        }
    }
}

static ISA_LEVEL: OnceLock<IsaLevel> = OnceLock::new();

pub fn get_isa_level() -> IsaLevel {
    *ISA_LEVEL.get_or_init(detect_isa_features)
}

// NEON is architecturally mandatory on aarch64.
#[cfg(target_arch = "aarch64")]
fn detect_isa_features() -> IsaLevel {
    IsaLevel::Neon
}

#[cfg(not(target_arch = "aarch64"))]
fn detect_isa_features() -> IsaLevel {
    IsaLevel::Scalar
}
