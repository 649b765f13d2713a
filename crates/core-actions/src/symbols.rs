//! Symbol to name translation for key tokens.
//!
//! Handlers are registered under identifier-like names, so punctuation inside a
//! token is spelled out before lookup (`$` -> `DOLLAR`, `d0` -> `dZERO`).

/// Replacement table, applied in order.
pub const SYMBOL_NAMES: &[(char, &str)] = &[
    ('!', "EXCLAMATION"),
    ('?', "QUESTION"),
    ('<', "LESS"),
    ('>', "GREATER"),
    ('|', "PIPE"),
    (' ', "SPACE"),
    ('@', "AT"),
    ('$', "DOLLAR"),
    ('0', "ZERO"),
];

/// Registry name for a key token: every occurrence of a table symbol is replaced by its name.
pub fn key_name(token: &str) -> String {
    SYMBOL_NAMES
        .iter()
        .fold(token.to_string(), |name, (symbol, text)| {
            name.replace(*symbol, text)
        })
}
