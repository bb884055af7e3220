use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use replplot::{PlotConfig, report};

#[derive(Parser, Debug)]
#[command(name = "replplot")]
struct Args {
    /// Benchmark results CSV written by the bench command.
    #[arg(long, default_value = "benchmarks/results.csv")]
    source: PathBuf,

    /// Directory to write chart images into.
    #[arg(long, default_value = "benchmarks")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    setup_tracing();
    let args = Args::parse();

    let config = PlotConfig::new(args.source, args.out_dir);
    info!("rendering charts with config {:?}", config);

    let written = report::run(&config)
        .with_context(|| format!("plotting {}", config.source_path.display()))?;

    for path in &written {
        println!("    wrote {}", path.display());
    }
    println!(
        "Saved {} charts to {}",
        written.len(),
        config.output_dir.display()
    );
    Ok(())
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
