//! Connected-components counting algorithms and benchmark harness.
//!
//! Four counting strategies over a [`concomp_core::CscBinaryMatrix`]:
//! sequential label propagation and union-find ([`sequential`]), and their
//! atomics-based parallel counterparts ([`label_prop`], [`union_find`]),
//! unified behind [`dispatch::count`]. [`bench`] times and cross-checks
//! them.

pub mod bench;
pub mod dispatch;
pub mod error;
pub mod label_prop;
pub mod sequential;
pub mod union_find;

pub use dispatch::{count, count_checked, Algorithm};
pub use error::{AlgoError, BenchError};

/// Chunk size for `rayon` phases whose per-item work is highly uneven
/// (column degree in a sparse graph can vary by orders of magnitude),
/// mirroring `#pragma omp parallel for schedule(dynamic, 128)` in
/// `original_source/src/algorithms/cc_openmp.c`. `rayon` has no literal
/// scheduler-hint API; `with_min_len` is its idiomatic stand-in.
pub(crate) const RAYON_DYNAMIC_CHUNK: usize = 128;

/// Chunk size for `rayon` phases whose per-item work is uniform (init,
/// flatten, count), mirroring `schedule(static, 1024)` in the same source.
pub(crate) const RAYON_STATIC_CHUNK: usize = 1024;

pub mod prelude {
    pub use crate::dispatch::{count, count_checked, Algorithm};
    pub use crate::error::{AlgoError, BenchError};
}
