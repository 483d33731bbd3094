//! Error types for the algorithms and the benchmark harness.

use thiserror::Error;

/// Failures a counting algorithm can report.
///
/// Per spec §4.3.c, allocation failures inside a parallel region are not
/// expected — the only fallible allocations (`label[]`, the bitmap in
/// `par_lp`) happen outside any parallel region, so `Alloc` is the only
/// failure mode besides bad arguments.
#[derive(Error, Debug)]
pub enum AlgoError {
    /// Allocating the label array (or, for `par_lp`, the popcount bitmap)
    /// failed.
    #[error("allocation failed while counting components")]
    Alloc,

    /// An unknown algorithm variant or a non-positive thread count was
    /// requested.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failures the benchmark harness can report.
#[derive(Error, Debug)]
pub enum BenchError {
    /// An algorithm invocation failed.
    #[error(transparent)]
    Algo(#[from] AlgoError),

    /// Two trials of the same algorithm (or two different algorithms
    /// claiming to count components of the same matrix) disagreed. This is
    /// always fatal: the spec defines it as such in §4.5 and §7.
    #[error(
        "inconsistent component count: {algorithm} (trial {trial}) reported {got}, expected {expected}"
    )]
    Inconsistent {
        /// Name of the algorithm whose count disagreed.
        algorithm: String,
        /// Index of the trial that disagreed.
        trial: usize,
        /// The count every prior trial/algorithm agreed on.
        expected: i64,
        /// The count this trial reported.
        got: i64,
    },
}
