//! Python/Sage literal rendering
//!
//! Every structural parameter that lands inside a generated snippet goes
//! through [`PyValue`], which renders it as an unambiguous literal of the
//! engine's surface syntax. Quotes, backslashes and control characters in
//! caller text can therefore never close a string early or start a new
//! statement.

use std::fmt;

/// A value destined to become a literal inside generated code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PyValue {
    Str(String),
    Int(i64),
    Bool(bool),
    /// Absent optional value (`None`)
    None,
}

impl fmt::Display for PyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PyValue::Str(s) => f.write_str(&quote_str(s)),
            PyValue::Int(i) => write!(f, "{}", i),
            PyValue::Bool(true) => f.write_str("True"),
            PyValue::Bool(false) => f.write_str("False"),
            PyValue::None => f.write_str("None"),
        }
    }
}

impl From<&str> for PyValue {
    fn from(value: &str) -> Self {
        PyValue::Str(value.to_string())
    }
}

impl From<String> for PyValue {
    fn from(value: String) -> Self {
        PyValue::Str(value)
    }
}

impl From<i64> for PyValue {
    fn from(value: i64) -> Self {
        PyValue::Int(value)
    }
}

impl From<bool> for PyValue {
    fn from(value: bool) -> Self {
        PyValue::Bool(value)
    }
}

impl<T: Into<PyValue>> From<Option<T>> for PyValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(PyValue::None)
    }
}

/// Quote a string as a single-quoted Python literal
///
/// Escapes `\`, `'`, `\n`, `\r`, `\t` and every other control character
/// (`\xNN`). Everything else, including non-ASCII text, is kept verbatim:
/// snippets are passed as UTF-8 argv and Python reads them as UTF-8 source.
pub fn quote_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
