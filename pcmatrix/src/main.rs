use std::env;
use std::process::ExitCode;

use prodcons::{
    DEFAULT_BUFFER_SIZE, DEFAULT_MATRICES, DEFAULT_WORKERS, MatrixMode, RunConfig, StdoutSink,
};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 5 {
        eprintln!("Usage: {} [workers] [buffer_size] [matrices] [mode]", args[0]);
        eprintln!("  mode 0 generates random sizes, mode N generates NxN matrices");
        return Err(format!("expected at most 4 arguments, got {}", args.len() - 1).into());
    }

    let config = parse_config(&args[1..])?;
    config.validate()?;

    if args.len() == 1 {
        print!("USING DEFAULTS: ");
    } else {
        print!("USING: ");
    }
    println!(
        "worker_threads={} bounded_buffer_size={} matricies={} matrix_mode={}",
        config.producers, config.buffer_size, config.matrices, config.mode
    );
    println!("Producing {} matrices in mode {}.", config.matrices, config.mode);
    println!("Using a shared buffer of size={}", config.buffer_size);
    println!("With {} producer and consumer thread(s).", config.producers);
    println!();

    let report = prodcons::run(&config, &config.mode, &StdoutSink)?;
    println!("{}", report);

    if !report.is_reconciled() {
        warn!(
            produced = report.produced,
            consumed = report.consumed,
            produced_sum = report.produced_sum,
            consumed_sum = report.consumed_sum,
            "produced and consumed totals do not match"
        );
    }
    Ok(report.is_reconciled())
}

/// Positional `[workers] [buffer_size] [matrices] [mode]`, each falling back
/// to its default when absent.
fn parse_config(args: &[String]) -> Result<RunConfig, std::num::ParseIntError> {
    let workers = parse_or(args.first(), DEFAULT_WORKERS)?;
    let buffer_size = parse_or(args.get(1), DEFAULT_BUFFER_SIZE)?;
    let matrices = parse_or(args.get(2), DEFAULT_MATRICES)?;
    let mode = parse_or(args.get(3), 0)?;

    Ok(RunConfig::symmetric(
        workers,
        buffer_size,
        matrices,
        MatrixMode::from(mode),
    ))
}

fn parse_or(arg: Option<&String>, default: usize) -> Result<usize, std::num::ParseIntError> {
    arg.map_or(Ok(default), |s| s.parse())
}
