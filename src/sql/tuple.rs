//! Quote-aware splitting of one row tuple into decoded values
//!
//! The input is the text between a row's opening and closing parenthesis.
//! Commas inside quoted strings are data, not delimiters, so the split
//! tracks a quote flag and a backslash-escape flag character by character.

use crate::sql::value::{decode_value, SqlValue};

/// Split one tuple body into an ordered sequence of decoded values.
///
/// A comma (or a `)(` sequence) embedded inside a quoted free-text field is
/// never treated as a boundary. A malformed trailing token still yields a
/// best-effort value; checking the value count against the statement's
/// declared column count is the caller's job.
pub fn parse_row_tuple(body: &str) -> Vec<SqlValue> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut escaped = false;

    for c in body.chars() {
        if in_quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '\'' {
                in_quote = false;
            }
            continue;
        }
        match c {
            '\'' => {
                in_quote = true;
                current.push(c);
            }
            ',' => {
                values.push(decode_value(&current));
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        values.push(decode_value(&current));
    }
    values
}
