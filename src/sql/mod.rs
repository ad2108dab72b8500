//! SQL dump parsing - streaming row extraction from a MySQL dump file
//!
//! This module turns the text of a `mysqldump`-style export into per-table
//! row buffers without a SQL engine. It understands exactly two statement
//! shapes: `CREATE TABLE` blocks (read only for column names) and batched
//! `INSERT INTO ... VALUES (...),(...);` statements, which may be split
//! across physical lines.
//!
//! Layers, bottom up:
//!
//! - **value**: decode one literal into a typed [`SqlValue`]
//! - **tuple**: split one parenthesized row tuple into values, quote-aware
//! - **scanner**: single streaming pass that fills a [`TableArena`]

pub mod scanner;
pub mod tuple;
pub mod value;

pub use scanner::{DecodedRow, DumpScanner, TableArena, ALLOWED_TABLES};
pub use tuple::parse_row_tuple;
pub use value::{decode_value, JoinKey, SqlValue};
