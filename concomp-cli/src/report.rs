//! Human-readable report printing. The `--json` path bypasses this module
//! entirely and writes `BenchmarkReport` straight through `serde_json`.

use concomp_algo::bench::BenchmarkReport;

pub fn print_human(report: &BenchmarkReport) {
    println!(
        "matrix: {} x {} nodes, {} edges",
        report.matrix.nrows, report.matrix.ncols, report.matrix.nnz
    );
    if let Some(host) = &report.system.hostname {
        println!("host: {host} ({} threads available)", report.system.threads_available);
    } else {
        println!("({} threads available)", report.system.threads_available);
    }
    println!("trials: {}", report.n_trials);
    println!();

    for result in &report.results {
        print!(
            "{:<8} t={:<3} components={:<10} wall={:.6}s (min {:.6}, max {:.6}, std {:.6})",
            result.algorithm,
            result.n_threads,
            result.component_count,
            result.wall_time.mean,
            result.wall_time.min,
            result.wall_time.max,
            result.wall_time.std,
        );
        if let (Some(speedup), Some(efficiency)) = (result.speedup, result.efficiency) {
            print!("  speedup={speedup:.2}x efficiency={:.1}%", efficiency * 100.0);
        }
        println!();
    }
}
