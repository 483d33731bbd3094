//! CLI glue for the `concomp` binary, split out of `main.rs` the way the
//! teacher separates `cli_main` (`cli/src/lib.rs`) from the binary's own
//! `main` (`cli/src/main.rs`), so the argument-parsing/dispatch path is
//! unit-testable without spawning a process.

mod args;
mod loader;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use concomp_algo::bench::{AlgoSpec, Harness};
#[cfg(test)]
use concomp_algo::dispatch::Algorithm;

pub use args::{AlgorithmArg, Cli};

/// Initializes `env_logger`, defaulting to the `info` level, matching
/// `cli/src/main.rs`'s `init_env_logger` call.
pub fn init_env_logger() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .context("initializing logger")?;
    Ok(())
}

/// Parses `args`, runs the benchmark plan it describes, and prints the
/// result. Returns `Ok(())` on success; any `Err` should become exit code
/// 1 in `main`.
pub fn cli_main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    log::info!("loading {}", cli.path.display());
    let matrix = loader::load(&cli.path)?;
    log::info!(
        "loaded {}x{} matrix, {} stored entries",
        matrix.nrows(),
        matrix.ncols(),
        matrix.nnz()
    );

    let plan: Vec<AlgoSpec> = cli
        .algorithm
        .expand()
        .into_iter()
        .map(|algorithm| AlgoSpec {
            algorithm,
            n_threads: if algorithm.is_parallel() { cli.threads } else { 1 },
        })
        .collect();

    log::debug!(
        "running {} algorithm(s) for {} trial(s)",
        plan.len(),
        cli.trials
    );
    let report = Harness::run(&matrix, &plan, cli.trials).context("running benchmark")?;

    if cli.json {
        serde_json::to_writer_pretty(std::io::stdout(), &report).context("writing JSON report")?;
        println!();
    } else {
        report::print_human(&report);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_arg_all_expands_to_every_variant() {
        assert_eq!(AlgorithmArg::All.expand(), Algorithm::ALL.to_vec());
    }

    #[test]
    fn algorithm_arg_single_expands_to_one_variant() {
        assert_eq!(AlgorithmArg::SeqUf.expand(), vec![Algorithm::SeqUf]);
    }
}
