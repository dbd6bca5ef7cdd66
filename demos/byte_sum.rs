//! End-to-end harness example on a modest buffer

use fork_join::prelude::*;

fn main() -> Result<()> {
    println!("=== Byte Sum Benchmark ===\n");

    let config = BenchConfig::new()
        .with_byte_cnt(16 * 1024 * 1024)
        .with_worker_cnt(4)
        .with_debug(1);

    let report = Harness::new(config).run()?;

    println!(
        "sequential: sum={} in {:?}",
        report.sequential_sum, report.sequential_elapsed
    );
    println!(
        "parallel:   sum={} in {:?} ({} workers)",
        report.parallel_sum, report.parallel_elapsed, report.worker_cnt
    );
    println!("speedup:    {:.2}x", report.speedup());

    Ok(())
}
