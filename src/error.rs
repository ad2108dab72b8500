//! Environment-level failures
//!
//! Per-record problems (malformed tuples, count mismatches, dangling
//! references) are silently dropped or degraded; only failures of the
//! environment itself are errors: the dump cannot be read, or the output
//! cannot be written.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmeltError {
    #[error("cannot read dump file {}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write output file {}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
