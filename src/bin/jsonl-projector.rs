//! jsonl-projector CLI - convert a JSONL file into CSV and JSON array files
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (also read from a
//! `.env` file). Stdout only carries the completion message.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jsonl-projector")]
#[command(version, about = "Project JSONL records onto code/detailed_context and write CSV and JSON outputs", long_about = None)]
struct Cli {
    /// Line-delimited JSON input file
    input: PathBuf,

    /// CSV file to create or overwrite
    csv_output: PathBuf,

    /// JSON array file to create or overwrite
    json_output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match jsonl_projector::convert(&cli.input, &cli.csv_output, &cli.json_output) {
        Ok(_) => println!("Conversion complete!"),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
