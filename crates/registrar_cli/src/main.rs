//! Registrar CLI
//!
//! Drives an in-memory registrar store from a script or standard input,
//! one command per line. State lasts for the lifetime of the process.
//!
//! # Commands
//!
//! - `dashboard` - Collection counts and recent entries
//! - `list course-types|courses|offerings|registrations [SEARCH]` - List a collection
//! - `add-course-type`, `update-course-type`, `delete-course-type` - Manage course types
//! - `add-course`, `update-course`, `delete-course` - Manage courses
//! - `add-offering`, `update-offering`, `delete-offering` - Manage offerings
//! - `register`, `registrations`, `unregister` - Manage student registrations
//! - `stats` - Operation counters

mod commands;
mod error;
mod session;

use clap::Parser;
use registrar_core::{EntityStore, IdAllocation, StoreConfig};
use session::{OutputFormat, Session};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Course registration catalog session.
#[derive(Parser)]
#[command(name = "registrar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Script to run (reads standard input when omitted)
    script: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Start without the sample catalog
    #[arg(long)]
    empty: bool,

    /// Never reuse ids of deleted records
    #[arg(long)]
    monotonic_ids: bool,

    /// Stop at the first failed command and exit with an error
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let policy = if cli.monotonic_ids {
        IdAllocation::Monotonic
    } else {
        IdAllocation::MaxPlusOne
    };
    let config = StoreConfig::new().seed(!cli.empty).id_allocation(policy);
    let mut session = Session::new(EntityStore::open(config), cli.format, cli.strict);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.script {
        Some(path) => session.run(BufReader::new(File::open(path)?), &mut out)?,
        None => session.run(io::stdin().lock(), &mut out)?,
    };
    tracing::debug!(store = ?session.store(), "session closed");

    Ok(())
}
