//! # Smelter - SQL dump to course-catalog documents
//!
//! Converts a static MySQL dump export of a commerce/course-catalog site
//! into one nested JSON document tree - courses with their scheduled
//! lessons, orders with their line items, and a derived instructor list -
//! without a live database or SQL engine.
//!
//! ## Modules
//!
//! - **sql**: hand-written literal decoder, tuple parser, and streaming
//!   dump scanner
//! - **catalog**: dependency-ordered reconstruction of the document tree
//! - **progress**: rate-limited status reporting for long runs
//!
//! ## Quick Start
//!
//! ```rust
//! use smelter::{smelt, ProgressReporter};
//! use std::io::Cursor;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dump = "INSERT INTO `commerce_product_field_data` \
//!     (`product_id`, `title`, `type`, `status`, `created`) \
//!     VALUES (1,'Anatomy 101','course',1,1700000000);\n";
//!
//! let catalog = smelt(Cursor::new(dump), &mut ProgressReporter::disabled())?;
//! assert_eq!(catalog.courses.len(), 1);
//! assert_eq!(catalog.courses[0]["title"], "Anatomy 101");
//! # Ok(())
//! # }
//! ```
//!
//! The pipeline is two strictly sequential phases: a single streaming scan
//! that buffers rows for an allow-list of tables, then a pure in-memory
//! join over those buffers. Scanning never loads the whole file, so dumps
//! of hundreds of megabytes stay within bounded memory.

use anyhow::Result;
use std::io::BufRead;

pub mod catalog;
pub mod error;
pub mod progress;
pub mod sql;

// Re-export commonly used types for convenience
pub use catalog::{rebuild, Catalog, EntityIndex};
pub use error::SmeltError;
pub use progress::ProgressReporter;
pub use sql::{DecodedRow, DumpScanner, SqlValue, TableArena, ALLOWED_TABLES};

/// Main entry point: scan a dump and rebuild the catalog document tree.
pub fn smelt<R: BufRead>(reader: R, progress: &mut ProgressReporter) -> Result<Catalog> {
    let arena = DumpScanner::new().scan(reader, progress)?;
    Ok(rebuild(&arena, progress))
}
