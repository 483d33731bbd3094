//! Parallel label propagation with atomic labels.
//!
//! Grounded in `original_source/src/algorithms/cc_openmp.c`'s
//! `cc_label_propagation`: every worker sweeps all stored entries each
//! round, writing the smaller of the two endpoint labels to both, until a
//! full round makes no change anywhere. The `finished` flag is a single
//! shared [`AtomicBool`]; any worker that makes a change clears it, mirroring
//! the original's `#pragma omp atomic write` on a shared `int changed`.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use concomp_core::CscBinaryMatrix;
use rayon::prelude::*;

use crate::error::AlgoError;
use crate::{RAYON_DYNAMIC_CHUNK, RAYON_STATIC_CHUNK};

/// Parallel label propagation (spec §4.3.a, variant 0).
///
/// Each round is a parallel sweep over columns; a round that makes no
/// change anywhere ends the loop. Final counting pops the population count
/// of distinct labels via a bitmap rather than a sort, since labels are
/// already dense node indices (spec §4.3.a: "any correct counting method is
/// acceptable").
pub fn par_lp(
    matrix: &CscBinaryMatrix,
    pool: &rayon::ThreadPool,
) -> Result<i64, AlgoError> {
    let n = matrix.nrows();
    if n == 0 {
        return Ok(0);
    }

    let mut raw: Vec<AtomicU32> = Vec::new();
    raw.try_reserve_exact(n).map_err(|_| AlgoError::Alloc)?;
    raw.extend((0..n as u32).map(AtomicU32::new));
    let label: Box<[AtomicU32]> = raw.into_boxed_slice();

    pool.install(|| {
        loop {
            let finished = AtomicBool::new(true);
            (0..matrix.ncols())
                .into_par_iter()
                .with_min_len(RAYON_DYNAMIC_CHUNK)
                .for_each(|col| {
                    for &row in matrix.column(col) {
                        let lc = label[col].load(Ordering::Relaxed);
                        let lr = label[row as usize].load(Ordering::Relaxed);
                        if lc != lr {
                            let min = lc.min(lr);
                            label[col].store(min, Ordering::Relaxed);
                            label[row as usize].store(min, Ordering::Relaxed);
                            finished.store(false, Ordering::Relaxed);
                        }
                    }
                });
            if finished.load(Ordering::Relaxed) {
                break;
            }
        }

        let nwords = n.div_ceil(64);
        let mut raw_words: Vec<AtomicU64> = Vec::new();
        raw_words
            .try_reserve_exact(nwords)
            .map_err(|_| AlgoError::Alloc)?;
        raw_words.extend((0..nwords).map(|_| AtomicU64::new(0)));
        let seen: Box<[AtomicU64]> = raw_words.into_boxed_slice();

        (0..n)
            .into_par_iter()
            .with_min_len(RAYON_STATIC_CHUNK)
            .for_each(|i| {
                let l = label[i].load(Ordering::Relaxed) as usize;
                seen[l / 64].fetch_or(1u64 << (l % 64), Ordering::Relaxed);
            });

        let count: i64 = seen
            .par_iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as i64)
            .sum();

        Ok(count)
    })
}
