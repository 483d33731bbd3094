//! The algorithm-selection surface (spec §6).
//!
//! [`Algorithm`] enumerates the four counting variants; [`count`] is the
//! single entry point the CLI and the benchmark harness both call through,
//! deliberately shaped like the original C dispatcher (`original_source/
//! main.c`'s `cc_count_components`): a non-negative return is a component
//! count, a negative one is an error sentinel. `concomp-core` and the rest
//! of `concomp-algo` never use that convention — it exists only at this
//! boundary, for parity with the original FFI-shaped contract the spec
//! preserves.

use concomp_core::CscBinaryMatrix;

use crate::error::AlgoError;
use crate::{label_prop, sequential, union_find};

/// One of the four counting strategies (spec §4.2, §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Sequential label propagation.
    SeqLp,
    /// Sequential union-find with path halving.
    SeqUf,
    /// Parallel label propagation with atomic labels.
    ParLp,
    /// Parallel lock-free union-find (Rem's algorithm).
    ParUf,
}

impl Algorithm {
    /// All four variants, in the order the harness reports them.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::SeqLp,
        Algorithm::SeqUf,
        Algorithm::ParLp,
        Algorithm::ParUf,
    ];

    /// Whether this variant uses a thread pool at all.
    pub fn is_parallel(self) -> bool {
        matches!(self, Algorithm::ParLp | Algorithm::ParUf)
    }

    /// Short, stable name used in CLI flags and benchmark reports.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::SeqLp => "seq-lp",
            Algorithm::SeqUf => "seq-uf",
            Algorithm::ParLp => "par-lp",
            Algorithm::ParUf => "par-uf",
        }
    }
}

/// Runs `algorithm` against `matrix`, building a thread pool of
/// `n_threads` workers when `algorithm` is parallel.
///
/// Returns the component count on success. `n_threads` is ignored by the
/// sequential variants.
pub fn count_checked(
    matrix: &CscBinaryMatrix,
    algorithm: Algorithm,
    n_threads: usize,
) -> Result<i64, AlgoError> {
    log::debug!("dispatch: running {} (n_threads={n_threads})", algorithm.name());
    match algorithm {
        Algorithm::SeqLp => Ok(sequential::seq_lp(matrix)),
        Algorithm::SeqUf => Ok(sequential::seq_uf(matrix)),
        Algorithm::ParLp | Algorithm::ParUf => {
            if n_threads == 0 {
                return Err(AlgoError::InvalidArgument(
                    "n_threads must be positive".to_string(),
                ));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()
                .map_err(|_| AlgoError::Alloc)?;
            match algorithm {
                Algorithm::ParLp => label_prop::par_lp(matrix, &pool),
                Algorithm::ParUf => union_find::par_uf(matrix, &pool),
                _ => unreachable!(),
            }
        }
    }
}

/// FFI-shaped convenience wrapper around [`count_checked`]: collapses any
/// error to `-1` instead of propagating a `Result`, matching
/// `original_source/main.c`'s "negative means error" dispatcher contract.
pub fn count(matrix: &CscBinaryMatrix, algorithm: Algorithm, n_threads: usize) -> i64 {
    count_checked(matrix, algorithm, n_threads).unwrap_or(-1)
}
