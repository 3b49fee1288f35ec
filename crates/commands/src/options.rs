//! Quote-aware splitting and joining of command-line style options.
//!
//! The `Command` header value carries the command identifier followed by
//! variant-specific flags (`flowlink.basic.StopFlow -id 7`). Values that
//! contain whitespace are double-quoted; quotes and backslashes inside a
//! quoted token are backslash-escaped.

use flowlink_core::{Error, Result};

/// Split a command-line string into tokens.
///
/// Whitespace separates tokens except inside double quotes. Within
/// quotes, `\"` and `\\` escape a literal quote and backslash. An
/// unterminated quote is an error.
pub fn split_options(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;
    // Distinguishes "" (an explicit empty token) from no token at all.
    let mut has_token = false;

    for ch in line.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(Error::UnbalancedQuotes { line: line.to_string() });
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Join tokens back into a command-line string, quoting where needed.
pub fn join_options(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| quote(t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(token: &str) -> String {
    if token.is_empty() || token.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\') {
        let escaped = token.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    } else {
        token.to_string()
    }
}
