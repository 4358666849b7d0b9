use std::collections::HashSet;

mod parsers;
mod scanner;

use parsers::{
    is_block_comment_end, is_block_comment_start, is_escaped_quote, is_line_comment_start,
};
use scanner::{State, continues_identifier, scan_digits, scan_identifier};

/// Number of bind parameters `sql` expects, following `SQLite`'s numbering.
///
/// `?NNN` uses index NNN, a bare `?` takes the next index after the largest
/// seen so far, and a named parameter (`:name`, `@name`, `$name`) takes the
/// next index the first time it appears. The arity is the largest index.
///
/// Placeholders inside string literals, quoted identifiers and comments are
/// ignored:
/// ```rust
/// use northwind_sql::placeholders::placeholder_arity;
///
/// assert_eq!(placeholder_arity("SELECT Id FROM Product LIMIT ?1 OFFSET ?2"), 2);
/// assert_eq!(placeholder_arity("SELECT '?9' FROM t WHERE a = ? -- ?3"), 1);
/// ```
#[must_use]
pub fn placeholder_arity(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut state = State::Normal;
    let mut highest = 0usize;
    let mut named: HashSet<&str> = HashSet::new();
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'`' => state = State::Backticked,
                b'[' => state = State::Bracketed,
                _ if is_line_comment_start(bytes, idx) => state = State::LineComment,
                _ if is_block_comment_start(bytes, idx) => {
                    state = State::BlockComment;
                    idx += 1;
                }
                b'?' => {
                    if let Some((digits_end, digits)) = scan_digits(bytes, idx + 1) {
                        if let Ok(n) = digits.parse::<usize>() {
                            highest = highest.max(n);
                        }
                        idx = digits_end - 1;
                    } else {
                        highest += 1;
                    }
                }
                b':' | b'@' | b'$' if !continues_identifier(bytes, idx) => {
                    if let Some((name_end, _)) = scan_identifier(bytes, idx + 1) {
                        if named.insert(&sql[idx..name_end]) {
                            highest += 1;
                        }
                        idx = name_end - 1;
                    }
                }
                _ => {}
            },
            State::SingleQuoted | State::DoubleQuoted | State::Backticked => {
                let quote = match state {
                    State::SingleQuoted => b'\'',
                    State::DoubleQuoted => b'"',
                    _ => b'`',
                };
                if is_escaped_quote(bytes, idx, quote) {
                    idx += 1;
                } else if b == quote {
                    state = State::Normal;
                }
            }
            State::Bracketed => {
                if b == b']' {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if is_block_comment_end(bytes, idx) {
                    state = State::Normal;
                    idx += 1;
                }
            }
        }
        idx += 1;
    }

    highest
}
