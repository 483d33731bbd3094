//! Command-line argument definitions (spec §6).
//!
//! Grounded in the teacher's `clap::Parser` derive style
//! (`cli/src/sccs.rs`'s `CliArgs`) and its `num_threads_parser` value
//! parser (`cli/src/lib.rs`).

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use concomp_algo::dispatch::Algorithm;

/// Rejects a thread count of zero, mirroring `cli/src/lib.rs`'s
/// `num_threads_parser`.
pub fn num_threads_parser(arg: &str) -> Result<usize> {
    let num_threads = arg.parse::<usize>()?;
    ensure!(num_threads > 0, "number of threads must be greater than 0");
    Ok(num_threads)
}

/// Which algorithm(s) to run. `All` is not one of the engine's own
/// variants — it tells the CLI to run all four and report them together,
/// since the dispatcher exposes four variants where the original CLI only
/// exposed two binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum AlgorithmArg {
    SeqLp,
    SeqUf,
    ParLp,
    ParUf,
    All,
}

impl AlgorithmArg {
    /// Expands to the concrete [`Algorithm`] list this argument selects.
    pub fn expand(self) -> Vec<Algorithm> {
        match self {
            AlgorithmArg::SeqLp => vec![Algorithm::SeqLp],
            AlgorithmArg::SeqUf => vec![Algorithm::SeqUf],
            AlgorithmArg::ParLp => vec![Algorithm::ParLp],
            AlgorithmArg::ParUf => vec![Algorithm::ParUf],
            AlgorithmArg::All => Algorithm::ALL.to_vec(),
        }
    }
}

/// Counts connected components of a sparse undirected graph given as a
/// binary matrix, optionally benchmarking multiple algorithms and thread
/// counts against each other.
#[derive(Parser, Debug)]
#[command(name = "concomp", version)]
pub struct Cli {
    /// The input matrix: a Matrix Market (`.mtx`) file, or a JSON
    /// MATLAB-style container (detected automatically).
    pub path: PathBuf,

    /// Number of threads to use for parallel variants.
    #[arg(short = 't', long, default_value_t = rayon::current_num_threads().max(1), value_parser = num_threads_parser)]
    pub threads: usize,

    /// Number of timed trials per algorithm.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub trials: usize,

    /// Which algorithm(s) to run.
    #[arg(short = 'a', long, value_enum, default_value_t = AlgorithmArg::All)]
    pub algorithm: AlgorithmArg,

    /// Emit the benchmark report as JSON instead of a human-readable
    /// summary.
    #[arg(long)]
    pub json: bool,
}
