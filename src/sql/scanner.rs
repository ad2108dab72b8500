//! Streaming dump scanner
//!
//! A single forward pass over the dump text, line by line, never holding
//! the whole file in memory. Two pieces of state are tracked: the table
//! whose `CREATE TABLE` block we are inside (for column-name discovery),
//! and the `INSERT` statement we are inside (for attributing continuation
//! lines). Rows of tables outside [`ALLOWED_TABLES`] are skipped at the
//! earliest possible point.
//!
//! Row boundaries in the `VALUES` clause are found with a persistent
//! character-level state machine (paren depth, quote flag, escape flag)
//! rather than a substring search for `),(`, because quoted free text can
//! itself contain that sequence. The machine survives line breaks, so a
//! statement split across many physical lines produces exactly the rows of
//! its single-line form.

use crate::progress::ProgressReporter;
use crate::sql::tuple::parse_row_tuple;
use crate::sql::value::{JoinKey, SqlValue};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::io::BufRead;

/// The fixed set of tables the scanner retains. Everything else in the
/// dump is ignored outright.
pub const ALLOWED_TABLES: &[&str] = &[
    "commerce_product_field_data",
    "commerce_product_variation_field_data",
    "taxonomy_term_field_data",
    "file_managed",
    "commerce_product__field_course_desc",
    "commerce_product__field_course_program",
    "commerce_product__field_course_img",
    "commerce_product__field_course_category",
    "commerce_product_variation__field_lesson_dates",
    "commerce_product_variation__field_location_ref",
    "commerce_product_variation__field_optional_prices",
    "commerce_product_variation__field_teachers",
    "users_field_data",
    "user__roles",
    "user__user_picture",
    "commerce_order",
    "commerce_order_item",
];

static INSERT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^INSERT INTO `(\w+)` \((.*?)\) VALUES").unwrap());

static CREATE_TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^CREATE TABLE `(\w+)`").unwrap());

static COLUMN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^`(\w+)`").unwrap());

/// Map a table name onto its canonical allow-list entry, or None for
/// tables the scanner ignores.
fn allowed_table(name: &str) -> Option<&'static str> {
    ALLOWED_TABLES.iter().find(|t| **t == name).copied()
}

/// One decoded row: ordered column/value pairs tagged with the source
/// table. Never mutated after being appended to its buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRow {
    pub table: &'static str,
    values: Vec<(String, SqlValue)>,
}

impl DecodedRow {
    fn new(table: &'static str, columns: &[String], values: Vec<SqlValue>) -> Self {
        DecodedRow {
            table,
            values: columns.iter().cloned().zip(values).collect(),
        }
    }

    /// Look up a value by column name. Row widths are small, so a linear
    /// scan beats a per-row map.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    /// Join key for an id column, if the column holds one.
    pub fn key(&self, column: &str) -> Option<JoinKey> {
        self.get(column).and_then(SqlValue::join_key)
    }

    /// Column value as JSON, null when the column is absent.
    pub fn json(&self, column: &str) -> Value {
        self.get(column).map(SqlValue::as_json).unwrap_or(Value::Null)
    }
}

/// Arena of per-table row buffers. One append-only buffer per allow-listed
/// table, created at scan start, frozen at scan end, then moved (not
/// copied) into the reconstruction phase. Rows for other tables cannot be
/// stored: buffers exist only for allow-listed names.
#[derive(Debug)]
pub struct TableArena {
    buffers: HashMap<&'static str, Vec<DecodedRow>>,
    columns: HashMap<&'static str, Vec<String>>,
}

impl TableArena {
    fn new() -> Self {
        TableArena {
            buffers: ALLOWED_TABLES.iter().map(|t| (*t, Vec::new())).collect(),
            columns: HashMap::new(),
        }
    }

    fn push(&mut self, row: DecodedRow) {
        if let Some(buffer) = self.buffers.get_mut(row.table) {
            buffer.push(row);
        }
    }

    /// Rows buffered for a table, in source order. Empty for unknown names.
    pub fn rows(&self, table: &str) -> &[DecodedRow] {
        self.buffers.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.rows(table).len()
    }

    /// Column names discovered from the table's `CREATE TABLE` block, if
    /// the dump contained one.
    pub fn discovered_columns(&self, table: &str) -> Option<&[String]> {
        self.columns.get(table).map(Vec::as_slice)
    }
}

/// In-flight `INSERT` statement: the target table, its declared columns,
/// and the tuple-boundary state machine.
struct InsertState {
    table: &'static str,
    columns: Vec<String>,
    depth: usize,
    in_quote: bool,
    escaped: bool,
    tuple: String,
}

impl InsertState {
    fn new(table: &'static str, columns: Vec<String>) -> Self {
        InsertState {
            table,
            columns,
            depth: 0,
            in_quote: false,
            escaped: false,
            tuple: String::new(),
        }
    }

    /// Consume one chunk of statement text, pushing each completed
    /// top-level tuple body into `out`. Returns true when the statement
    /// terminator is reached.
    fn feed(&mut self, chunk: &str, out: &mut Vec<String>) -> bool {
        for c in chunk.chars() {
            if self.in_quote {
                self.tuple.push(c);
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == '\'' {
                    self.in_quote = false;
                }
                continue;
            }
            match c {
                '(' => {
                    if self.depth == 0 {
                        self.tuple.clear();
                    } else {
                        self.tuple.push(c);
                    }
                    self.depth += 1;
                }
                ')' if self.depth > 0 => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        out.push(std::mem::take(&mut self.tuple));
                    } else {
                        self.tuple.push(c);
                    }
                }
                '\'' if self.depth > 0 => {
                    self.in_quote = true;
                    self.tuple.push(c);
                }
                ';' if self.depth == 0 => return true,
                _ => {
                    if self.depth > 0 {
                        self.tuple.push(c);
                    }
                }
            }
        }
        false
    }
}

/// Single-pass scanner over a SQL dump.
pub struct DumpScanner {
    arena: TableArena,
    schema_table: Option<&'static str>,
    insert: Option<InsertState>,
    pending_tuples: Vec<String>,
}

impl DumpScanner {
    pub fn new() -> Self {
        DumpScanner {
            arena: TableArena::new(),
            schema_table: None,
            insert: None,
            pending_tuples: Vec::new(),
        }
    }

    /// Scan the dump and return the frozen arena.
    ///
    /// Lines are read raw and decoded lossily, so invalid UTF-8 byte
    /// sequences are replaced rather than fatal.
    pub fn scan<R: BufRead>(
        mut self,
        mut reader: R,
        progress: &mut ProgressReporter,
    ) -> Result<TableArena> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .context("failed to read from dump")?;
            if n == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            self.process_line(&line, progress);
        }
        progress.report(true, || {
            format!("...parsed rows - {}", self.format_counts(None))
        });
        Ok(self.arena)
    }

    fn process_line(&mut self, line: &str, progress: &mut ProgressReporter) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        if trimmed.starts_with("CREATE TABLE") {
            if let Some(cap) = CREATE_TABLE_RE.captures(trimmed) {
                // Column lists are only retained for tables we keep rows
                // for; everything else stays unparsed.
                self.schema_table = allowed_table(&cap[1]);
                if let Some(table) = self.schema_table {
                    self.arena.columns.insert(table, Vec::new());
                }
                // A new table definition invalidates any unterminated
                // insert statement.
                self.insert = None;
            }
            return;
        }

        if trimmed.starts_with("INSERT INTO") {
            // Match on the start-trimmed line but keep the trailing
            // newline: a string value continued on the next physical line
            // must retain it.
            self.begin_insert(line.trim_start(), progress);
            return;
        }

        if self.insert.is_some() {
            // Continuation of a multi-line statement. Feed the raw line so
            // a string value split across the break keeps its newline.
            self.feed_insert(line, progress);
            return;
        }

        if let Some(table) = self.schema_table {
            if trimmed.starts_with('`') {
                if let Some(cap) = COLUMN_RE.captures(trimmed) {
                    if let Some(cols) = self.arena.columns.get_mut(table) {
                        cols.push(cap[1].to_string());
                    }
                }
                return;
            }
            if trimmed.starts_with(") ENGINE") {
                self.schema_table = None;
            }
        }
    }

    fn begin_insert(&mut self, line: &str, progress: &mut ProgressReporter) {
        let Some(cap) = INSERT_RE.captures(line) else {
            self.insert = None;
            return;
        };
        let Some(table) = allowed_table(&cap[1]) else {
            self.insert = None;
            return;
        };
        let columns: Vec<String> = cap[2]
            .split(',')
            .map(|c| c.trim().trim_matches('`').to_string())
            .collect();

        self.insert = Some(InsertState::new(table, columns));
        let rest = &line[cap.get(0).unwrap().end()..];
        self.feed_insert(rest, progress);
    }

    fn feed_insert(&mut self, chunk: &str, progress: &mut ProgressReporter) {
        let Some(insert) = self.insert.as_mut() else {
            return;
        };
        let mut tuples = std::mem::take(&mut self.pending_tuples);
        let ended = insert.feed(chunk, &mut tuples);
        let table = insert.table;
        let columns = insert.columns.clone();

        for body in tuples.drain(..) {
            let values = parse_row_tuple(&body);
            // Structural mismatches are dropped, never raised.
            if values.len() != columns.len() {
                continue;
            }
            self.arena.push(DecodedRow::new(table, &columns, values));
            progress.report(false, || {
                format!("...parsed rows - {}", self.format_counts(Some(table)))
            });
        }

        self.pending_tuples = tuples;
        if ended {
            self.insert = None;
        }
    }

    fn format_counts(&self, last_table: Option<&str>) -> String {
        let hint = last_table
            .map(|t| format!(" (table: {t})"))
            .unwrap_or_default();
        format!(
            "courses:{} lessons:{} orders:{} items:{} users:{} files:{}{}",
            self.arena.row_count("commerce_product_field_data"),
            self.arena.row_count("commerce_product_variation_field_data"),
            self.arena.row_count("commerce_order"),
            self.arena.row_count("commerce_order_item"),
            self.arena.row_count("users_field_data"),
            self.arena.row_count("file_managed"),
            hint,
        )
    }
}

impl Default for DumpScanner {
    fn default() -> Self {
        Self::new()
    }
}
