//! pagedb shell binary.
//!
//! Opens the database file given on the command line, runs the shell on
//! stdin/stdout, and flushes the table on `.exit` or end of input.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pagedb::{repl, Table};
use tracing_subscriber::{fmt, EnvFilter};

/// Single-table record store
#[derive(Parser, Debug)]
#[command(name = "pagedb")]
#[command(about = "Single-table record store backed by a paginated file")]
#[command(version)]
struct Args {
    /// Database file (created if it does not exist)
    db_path: PathBuf,
}

fn main() -> ExitCode {
    // Logs go to stderr so the shell's stdout stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> pagedb::Result<()> {
    let mut table = Table::open(&args.db_path)?;
    tracing::info!(
        "Opened {} ({} rows)",
        args.db_path.display(),
        table.row_count()
    );

    repl::run(&mut table, io::stdin().lock(), io::stdout().lock())?;

    table.close()
}
