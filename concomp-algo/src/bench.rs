//! Benchmark harness (spec §4.5).
//!
//! Grounded in `original_source/src/utils/json.h`'s `BenchmarkData` shape
//! (`sys_info`/`matrix_info`/`benchmark_info`/`result`) and the teacher's
//! `cli/src/bench/bf_visit.rs` repeated-trial pattern. Every type here
//! derives `serde::Serialize`; `concomp-cli` is the one that actually
//! writes the JSON (`serde_json::to_writer_pretty`), the same way the rest
//! of the pack keeps serialization derives in the data-owning crate and
//! the writer in the binary that needs it (`cli/src/perm/bfs.rs`).

use std::time::Instant;

use concomp_core::CscBinaryMatrix;
use serde::Serialize;

use crate::dispatch::{count_checked, Algorithm};
use crate::error::BenchError;

/// One algorithm/thread-count combination to benchmark.
#[derive(Debug, Clone, Copy)]
pub struct AlgoSpec {
    /// Which variant to run.
    pub algorithm: Algorithm,
    /// Thread pool size; ignored by sequential variants.
    pub n_threads: usize,
}

/// Per-trial timing summary, in seconds.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
    pub median: f64,
}

impl Stats {
    fn from_samples(mut samples: Vec<f64>) -> Self {
        let n = samples.len() as f64;
        let sum: f64 = samples.iter().sum();
        let mean = sum / n;
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        samples.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
        let mid = samples.len() / 2;
        let median = if samples.len() % 2 == 0 {
            (samples[mid - 1] + samples[mid]) / 2.0
        } else {
            samples[mid]
        };
        Stats {
            mean,
            min,
            max,
            std,
            median,
        }
    }
}

/// Best-effort system metadata. Hostname resolution failures are never
/// fatal — the field is simply omitted.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub threads_available: usize,
    pub hostname: Option<String>,
}

impl SystemInfo {
    fn collect() -> Self {
        SystemInfo {
            threads_available: num_cpus::get(),
            hostname: hostname(),
        }
    }
}

fn hostname() -> Option<String> {
    // Best-effort: POSIX-only, never a hard error if it fails.
    let mut buf = vec![0u8; 256];
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if rc != 0 {
        return None;
    }
    let nul = buf.iter().position(|&b| b == 0)?;
    buf.truncate(nul);
    String::from_utf8(buf).ok()
}

/// Shape and size of the matrix a benchmark ran against.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixInfo {
    pub nrows: usize,
    pub ncols: usize,
    pub nnz: usize,
}

impl MatrixInfo {
    fn from_matrix(matrix: &CscBinaryMatrix) -> Self {
        MatrixInfo {
            nrows: matrix.nrows(),
            ncols: matrix.ncols(),
            nnz: matrix.nnz(),
        }
    }
}

/// Timing and agreement result for one [`AlgoSpec`].
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmResult {
    pub algorithm: String,
    pub n_threads: usize,
    pub component_count: i64,
    pub wall_time: Stats,
    pub cpu_time: Stats,
    pub speedup: Option<f64>,
    pub efficiency: Option<f64>,
}

/// The full report produced by [`Harness::run`].
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub system: SystemInfo,
    pub matrix: MatrixInfo,
    pub n_trials: usize,
    pub results: Vec<AlgorithmResult>,
}

/// Measures process CPU time (`ru_utime + ru_stime`) via `getrusage`.
/// Falls back to `None` rather than erroring — CPU-time reporting is an
/// ambient diagnostic, not a correctness property.
fn cpu_time_seconds() -> Option<f64> {
    unsafe {
        let mut usage: libc::rusage = std::mem::zeroed();
        if libc::getrusage(libc::RUSAGE_SELF, &mut usage) != 0 {
            return None;
        }
        let user = usage.ru_utime.tv_sec as f64 + usage.ru_utime.tv_usec as f64 / 1e6;
        let sys = usage.ru_stime.tv_sec as f64 + usage.ru_stime.tv_usec as f64 / 1e6;
        Some(user + sys)
    }
}

/// Runs each [`AlgoSpec`] in `plan` for `n_trials` trials against `matrix`,
/// checking that every trial (and every algorithm) agrees on the component
/// count, and computing speedup/efficiency relative to the fastest
/// sequential entry in the same plan.
pub struct Harness;

impl Harness {
    pub fn run(
        matrix: &CscBinaryMatrix,
        plan: &[AlgoSpec],
        n_trials: usize,
    ) -> Result<BenchmarkReport, BenchError> {
        let n_trials = n_trials.max(1);
        let mut expected: Option<i64> = None;
        let mut results = Vec::with_capacity(plan.len());

        for spec in plan {
            let mut wall_samples = Vec::with_capacity(n_trials);
            let mut cpu_samples = Vec::with_capacity(n_trials);
            let mut trial_count: Option<i64> = None;

            for trial in 0..n_trials {
                let cpu_before = cpu_time_seconds();
                let wall_start = Instant::now();
                let got = count_checked(matrix, spec.algorithm, spec.n_threads)?;
                let wall_elapsed = wall_start.elapsed().as_secs_f64();
                let cpu_elapsed = match (cpu_before, cpu_time_seconds()) {
                    (Some(before), Some(after)) => after - before,
                    _ => wall_elapsed,
                };

                match trial_count {
                    None => trial_count = Some(got),
                    Some(prev) if prev != got => {
                        return Err(BenchError::Inconsistent {
                            algorithm: spec.algorithm.name().to_string(),
                            trial,
                            expected: prev,
                            got,
                        });
                    }
                    _ => {}
                }

                wall_samples.push(wall_elapsed);
                cpu_samples.push(cpu_elapsed);
            }

            let got = trial_count.expect("n_trials is clamped to at least 1");
            match expected {
                None => expected = Some(got),
                Some(exp) if exp != got => {
                    return Err(BenchError::Inconsistent {
                        algorithm: spec.algorithm.name().to_string(),
                        trial: 0,
                        expected: exp,
                        got,
                    });
                }
                _ => {}
            }

            results.push(AlgorithmResult {
                algorithm: spec.algorithm.name().to_string(),
                n_threads: spec.n_threads,
                component_count: got,
                wall_time: Stats::from_samples(wall_samples),
                cpu_time: Stats::from_samples(cpu_samples),
                speedup: None,
                efficiency: None,
            });
        }

        let fastest_sequential = results
            .iter()
            .zip(plan)
            .filter(|(_, spec)| !spec.algorithm.is_parallel())
            .map(|(result, _)| result.wall_time.mean)
            .fold(f64::INFINITY, f64::min);

        if fastest_sequential.is_finite() {
            for (result, spec) in results.iter_mut().zip(plan) {
                if spec.algorithm.is_parallel() && spec.n_threads > 0 {
                    let speedup = fastest_sequential / result.wall_time.mean;
                    result.speedup = Some(speedup);
                    result.efficiency = Some(speedup / spec.n_threads as f64);
                }
            }
        }

        Ok(BenchmarkReport {
            system: SystemInfo::collect(),
            matrix: MatrixInfo::from_matrix(matrix),
            n_trials,
            results,
        })
    }
}
