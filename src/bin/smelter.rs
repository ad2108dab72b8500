//! smelter: Reconstruct course-catalog documents from a SQL dump
//!
//! Reads a `mysqldump`-style export of the source commerce site and writes
//! one JSON document with `courses` (embedding `lessons`), `orders`
//! (embedding `items`), and the derived `teachers` list.
//!
//! Usage:
//!   # Read from file, pretty JSON to stdout
//!   smelter ipv_prd.sql
//!
//!   # Read from stdin, write compact JSON to a file
//!   cat ipv_prd.sql | smelter --compact -o catalog.json
//!
//!   # Show periodic progress during a long run
//!   smelter ipv_prd.sql -o catalog.json --progress

// Use MiMalloc allocator for better performance on large dumps
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Result;
use clap::Parser;
use smelter::{smelt, ProgressReporter, SmeltError};
use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "smelter")]
#[command(about = "Reconstruct course-catalog documents from a SQL dump", long_about = None)]
struct Args {
    /// Input SQL dump (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output JSON file (stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,

    /// Print periodic progress while scanning and rebuilding
    #[arg(long)]
    progress: bool,

    /// Minimum seconds between progress messages
    #[arg(long, default_value_t = 2.0)]
    progress_interval: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut progress = ProgressReporter::new(
        args.progress,
        Duration::from_secs_f64(args.progress_interval),
    );

    // Create reader based on input source
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| SmeltError::InputUnreadable {
                path: path.clone(),
                source,
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(stdin())),
    };

    let catalog = smelt(reader, &mut progress)?;

    let mut serialized = if args.compact {
        serde_json::to_string(&catalog)?
    } else {
        serde_json::to_string_pretty(&catalog)?
    };
    serialized.push('\n');

    match &args.output {
        Some(path) => {
            std::fs::write(path, &serialized).map_err(|source| SmeltError::OutputUnwritable {
                path: path.clone(),
                source,
            })?;
            eprintln!(
                "Saved {} courses, {} lessons, {} participants to {}",
                catalog.courses.len(),
                catalog.lesson_count(),
                catalog.participant_count(),
                path.display()
            );
        }
        None => {
            std::io::stdout().write_all(serialized.as_bytes())?;
        }
    }

    Ok(())
}
