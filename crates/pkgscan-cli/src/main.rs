//! Timing harness for the manifest extraction paths.
//!
//! Loads one `package.json`, then measures each loader, each extraction
//! strategy, and the combined load-then-scan path, reporting the fastest
//! pass of each as GB/s. `--json` skips the timings and dumps the extracted
//! record instead.

use std::{
    error::Error,
    hint::black_box,
    path::PathBuf,
    process::ExitCode,
    time::{Duration, Instant},
};

use clap::Parser;
use pkgscan::{extract_by_lookup, extract_by_scan, read_chunked, read_two_pass};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "pkgscan",
    version,
    about = "Measure manifest field extraction throughput"
)]
struct Cli {
    /// Path to a package manifest (package.json).
    manifest: PathBuf,

    /// Passes per measurement; the fastest pass is reported.
    #[arg(long, default_value_t = 400)]
    iterations: u32,

    /// Print the extracted fields as JSON instead of the timing table.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pkgscan: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let buffer = read_two_pass(&cli.manifest)?;
    debug!(
        bytes = buffer.len(),
        margin = buffer.margin(),
        "loaded manifest"
    );

    let fields = extract_by_scan(&buffer)?;
    debug!(
        name = %fields.name,
        package_type = %fields.package_type,
        recognized = fields.has_recognized_fields,
        "extracted fields"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
        return Ok(());
    }

    // Preflight the remaining paths once so errors surface before timing;
    // inside the loops results are discarded.
    read_chunked(&cli.manifest)?;
    extract_by_lookup(&buffer)?;

    let bytes = buffer.len();
    let iterations = cli.iterations;
    let path = &cli.manifest;

    row("read_chunked", bytes, iterations, || {
        let _ = black_box(read_chunked(path));
    });
    row("read_two_pass", bytes, iterations, || {
        let _ = black_box(read_two_pass(path));
    });
    row("extract_by_lookup", bytes, iterations, || {
        let _ = black_box(extract_by_lookup(&buffer));
    });
    row("extract_by_scan", bytes, iterations, || {
        let _ = black_box(extract_by_scan(&buffer));
    });
    row("read_chunked+extract_by_scan", bytes, iterations, || {
        let loaded = read_chunked(path);
        if let Ok(doc) = loaded {
            let _ = black_box(extract_by_scan(&doc));
        }
    });

    Ok(())
}

fn row(name: &str, bytes: usize, iterations: u32, mut op: impl FnMut()) {
    let fastest = fastest(iterations, &mut op);
    println!("{name:<30} {:>7.2} GB/s", throughput(bytes, fastest));
}

fn fastest(iterations: u32, op: &mut impl FnMut()) -> Duration {
    let mut best = Duration::MAX;
    for _ in 0..iterations {
        let start = Instant::now();
        op();
        best = best.min(start.elapsed());
    }
    best
}

// Bytes per nanosecond comes out on the same scale as GB/s.
#[allow(clippy::cast_precision_loss)]
fn throughput(bytes: usize, elapsed: Duration) -> f64 {
    bytes as f64 / elapsed.as_nanos() as f64
}
