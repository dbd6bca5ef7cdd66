//! Byte-summing benchmark: sequential vs fork-join parallel reduction
//!
//! Flags (single-dash, value follows the flag):
//! `-debug <int>`, `-seed <int>`, `-thread_cnt <int>`, `-byte_cnt <int>`,
//! `-random`. Any unrecognized flag is a fatal configuration error.

use fork_join::prelude::*;
use std::env;
use std::process;
use std::str::FromStr;

fn flag_value<T: FromStr>(flag: &str, value: Option<String>) -> Result<T> {
    let value =
        value.ok_or_else(|| Error::InvalidConfig(format!("missing value for {}", flag)))?;
    value
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("malformed value for {}: {}", flag, value)))
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<BenchConfig> {
    let mut config = BenchConfig::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-debug" => config.debug = flag_value(&arg, args.next())?,
            "-seed" => config.seed = flag_value(&arg, args.next())?,
            "-thread_cnt" => config.worker_cnt = flag_value(&arg, args.next())?,
            "-byte_cnt" => config.byte_cnt = flag_value(&arg, args.next())?,
            "-random" => config.fill = FillMode::Random,
            _ => {
                return Err(Error::InvalidConfig(format!("unknown option: {}", arg)));
            }
        }
    }

    Ok(config)
}

fn run() -> Result<()> {
    let config = parse_args(env::args().skip(1))?;

    println!("Initializing {} bytes...", config.byte_cnt);
    let report = Harness::new(config).run()?;

    println!("\nAdding bytes using 1 thread...");
    println!(
        "sum={} elapsed={:.6} secs",
        report.sequential_sum,
        report.sequential_elapsed.as_secs_f64()
    );

    println!("\nAdding bytes using {} threads...", report.worker_cnt);
    println!(
        "sum={} elapsed={:.6} secs",
        report.parallel_sum,
        report.parallel_elapsed.as_secs_f64()
    );

    println!("\nSpeedup={:.2}x", report.speedup());

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
