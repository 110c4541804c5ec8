use std::sync::atomic::{AtomicBool, Ordering};

use super::glob;
use crate::error::SuppressionError;
use crate::path;

/// Rule id that matches every error kind.
pub const ANY_ID: &str = "*";

/// Id of the unused-function check, reported as unmatched only on request.
pub const UNUSED_FUNCTION_ID: &str = "unusedFunction";

/// A single suppression criterion.
///
/// Empty strings and a zero line are "match anything" for their field.
#[derive(Debug, Default)]
pub struct Suppression {
    pub error_id: String,
    pub file_name: String,
    pub line_number: usize,
    pub symbol_name: String,
    matched: AtomicBool,
}

/// One diagnostic as seen by the matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMessage {
    pub error_id: String,
    /// Path with normalized separators.
    pub file_name: String,
    pub line_number: usize,
    /// Symbol names, each terminated by `\n`.
    pub symbol_names: String,
}

impl ErrorMessage {
    pub fn new(error_id: impl Into<String>, file_name: &str, line_number: usize) -> Self {
        Self {
            error_id: error_id.into(),
            file_name: path::normalize(file_name),
            line_number,
            symbol_names: String::new(),
        }
    }

    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for symbol in symbols {
            self.symbol_names.push_str(symbol.as_ref());
            self.symbol_names.push('\n');
        }
        self
    }

    fn has_symbol(&self, symbol: &str) -> bool {
        self.symbol_names.split('\n').any(|s| s == symbol)
    }
}

impl Suppression {
    pub fn new(
        error_id: impl Into<String>,
        file_name: impl Into<String>,
        line_number: usize,
    ) -> Self {
        Self {
            error_id: error_id.into(),
            file_name: file_name.into(),
            line_number,
            ..Self::default()
        }
    }

    pub fn with_symbol(mut self, symbol_name: impl Into<String>) -> Self {
        self.symbol_name = symbol_name.into();
        self
    }

    /// Parse one rule line of the form `id[:file[:line]]`.
    ///
    /// The last colon of the file part separates a line number only when no
    /// `.` follows it and the text after it reads as a positive integer.
    /// Anything else keeps the colon in the path, so `C:\src\a.c` stays a
    /// path. The id is not validated here.
    pub fn parse_line(line: &str) -> Self {
        let (error_id, file_spec) = line.split_once(':').unwrap_or((line, ""));

        let mut file_name = file_spec;
        let mut line_number = 0;
        if let Some(pos) = file_spec.rfind(':') {
            let tail = &file_spec[pos + 1..];
            if !tail.contains('.') {
                if let Some(n) = parse_leading_number(tail).filter(|&n| n > 0) {
                    line_number = n;
                    file_name = &file_spec[..pos];
                }
            }
        }

        Self::new(error_id, path::normalize(file_name), line_number)
    }

    /// Check the id syntax: `*`, or a non-empty run of ASCII alphanumerics
    /// and `_` that does not start with a digit.
    pub fn validate(&self) -> Result<(), SuppressionError> {
        let id = self.error_id.as_str();
        if id.is_empty() {
            return Err(SuppressionError::NoId);
        }
        if id == ANY_ID {
            return Ok(());
        }
        let valid = id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
            && !id.starts_with(|c: char| c.is_ascii_digit());
        if valid {
            Ok(())
        } else {
            Err(SuppressionError::InvalidId(id.to_string()))
        }
    }

    /// Test the rule against `msg` and mark it matched on success.
    pub fn is_match(&self, msg: &ErrorMessage) -> bool {
        if !self.matches_fields(msg) {
            return false;
        }
        self.matched.store(true, Ordering::Relaxed);
        true
    }

    fn matches_fields(&self, msg: &ErrorMessage) -> bool {
        if !self.error_id.is_empty() && self.error_id != ANY_ID && self.error_id != msg.error_id {
            return false;
        }
        if !self.file_name.is_empty() && !glob::matches(&self.file_name, &msg.file_name) {
            return false;
        }
        if self.line_number > 0 && self.line_number != msg.line_number {
            return false;
        }
        if !self.symbol_name.is_empty() && !msg.has_symbol(&self.symbol_name) {
            return false;
        }
        true
    }

    pub fn is_matched(&self) -> bool {
        self.matched.load(Ordering::Relaxed)
    }

    /// Local rules name one concrete file; everything else applies tool-wide.
    pub fn is_local(&self) -> bool {
        !self.file_name.is_empty() && !glob::has_wildcard(&self.file_name)
    }
}

impl Clone for Suppression {
    fn clone(&self) -> Self {
        Self {
            error_id: self.error_id.clone(),
            file_name: self.file_name.clone(),
            line_number: self.line_number,
            symbol_name: self.symbol_name.clone(),
            matched: AtomicBool::new(self.is_matched()),
        }
    }
}

impl PartialEq for Suppression {
    fn eq(&self, other: &Self) -> bool {
        self.error_id == other.error_id
            && self.file_name == other.file_name
            && self.line_number == other.line_number
            && self.symbol_name == other.symbol_name
    }
}

impl Eq for Suppression {}

impl std::fmt::Display for Suppression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.error_id)?;
        if !self.file_name.is_empty() {
            write!(f, ":{}", self.file_name)?;
            if self.line_number > 0 {
                write!(f, ":{}", self.line_number)?;
            }
        } else if self.line_number > 0 {
            write!(f, " (line {})", self.line_number)?;
        }
        if !self.symbol_name.is_empty() {
            write!(f, " [{}]", self.symbol_name)?;
        }
        Ok(())
    }
}

/// Read a line number the way a stream extraction would: skip leading
/// whitespace, take the leading digits, ignore the rest. Values too large
/// for `usize` saturate.
pub(crate) fn parse_leading_number(text: &str) -> Option<usize> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let digits = &text[..end];
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(usize::MAX))
}
