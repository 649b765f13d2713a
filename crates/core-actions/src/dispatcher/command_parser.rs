//! Ex-command line parsing.
//!
//! Converts the text typed after `:` into a `ParsedCommand`. Pure
//! classification; registry lookup happens in the dispatcher.
//!
//! * Leading whitespace is skipped.
//! * The name runs up to the first whitespace; the arguments are the rest with
//!   their leading whitespace removed (trailing whitespace is kept).
//! * An all-digit name is a line number (`:42`).
//! * Empty lines and names starting with `_` are ignored.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand<'a> {
    Ignored,
    /// 1-based line number; values too large for `usize` saturate.
    GoToLine(usize),
    Named {
        name: &'a str,
        args: &'a str,
    },
}

pub fn parse(line: &str) -> ParsedCommand<'_> {
    let body = line.trim_start();
    let (name, args) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (body, ""),
    };
    if name.is_empty() || name.starts_with('_') {
        return ParsedCommand::Ignored;
    }
    if name.bytes().all(|b| b.is_ascii_digit()) {
        return ParsedCommand::GoToLine(name.parse().unwrap_or(usize::MAX));
    }
    ParsedCommand::Named { name, args }
}
