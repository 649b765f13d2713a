//! Key sequence parsing for the command line.
//!
//! The command-line text is re-parsed after every change. A parse either
//! reports "not a complete token yet" (`None`) or splits off exactly one
//! token together with its repeat count, leaving the rest untouched:
//!
//! ```text
//! ^([0-9]*)( <prefix>. | [^<prefix>1-9] )(.*)$
//! ```
//!
//! * Prefix characters (`cdfFmrtTyzZ@'`"<>`) need one more arbitrary character
//!   to form a token (`dd`, `dw`, `ZZ`).
//! * Any other single character that is not a digit 1-9 is a token on its own.
//! * A digit run worth zero (`0`, `00`) is not a count: its first `0` is the
//!   start-of-line motion and the rest stays in the buffer.
//! * Any other digit run is the count, leading zeros included (`05j` is `5j`).
//!   A `0` inside it never ends the run (`10` is still waiting for a key).
//!
//! Buffers starting with `:`, `!`, `/` or `?` are whole-line commands handled on
//! return and never parse here.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that start a two-character token.
pub const PREFIX_CHARS: &str = "cdfFmrtTyzZ@'`\"<>";
/// First characters that turn the buffer into a line command.
pub const COMMAND_PREFIX_CHARS: &str = ":!/?";
/// Upper bound for repeat counts.
pub const MAX_REPEAT: u32 = 999_999;

static KEY_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"(?s)^([0-9]*)([{PREFIX_CHARS}].|[^{PREFIX_CHARS}1-9])(.*)$");
    Regex::new(&pattern).expect("key grammar is a valid regex")
});

/// One parsed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySequence {
    pub repeat: u32,
    pub token: String,
    pub leftover: String,
}

impl KeySequence {
    fn new(repeat: u32, token: &str, leftover: &str) -> Self {
        Self {
            repeat,
            token: token.to_string(),
            leftover: leftover.to_string(),
        }
    }
}

/// Parse the next token off the front of `buffer`.
pub fn parse(buffer: &str) -> Option<KeySequence> {
    let first = buffer.chars().next()?;
    if COMMAND_PREFIX_CHARS.contains(first) {
        return None;
    }
    let run = leading_digits(buffer);
    if !run.is_empty() && run.bytes().all(|b| b == b'0') {
        return Some(KeySequence::new(1, "0", &buffer[1..]));
    }
    let caps = KEY_GRAMMAR.captures(buffer)?;
    let digits = caps.get(1).map_or("", |m| m.as_str());
    let token = caps.get(2)?.as_str();
    let leftover = caps.get(3).map_or("", |m| m.as_str());

    if token == "0" {
        // The regex backtracked a zero out of a count still being typed.
        return None;
    }
    let repeat = if digits.is_empty() {
        1
    } else {
        digits
            .parse::<u32>()
            .map_or(MAX_REPEAT, |n| n.min(MAX_REPEAT))
    };
    Some(KeySequence::new(repeat, token, leftover))
}

fn leading_digits(buffer: &str) -> &str {
    let end = buffer
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(buffer.len());
    &buffer[..end]
}
