use serde::de::IgnoredAny;
use serde::Deserialize;
use std::path::Path;

use super::rule::{parse_leading_number, Suppression};
use crate::error::SuppressionError;
use crate::path;

/// Tag of the records that describe a suppression.
pub const RULE_TAG: &str = "suppress";

fn default_tag() -> String {
    RULE_TAG.to_string()
}

/// A decoded structured rule document.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Document {
    pub suppressions: Vec<Record>,
}

/// One element of a structured document: a tag and its child fields.
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub line_number: Option<LineText>,
    #[serde(default)]
    pub symbol_name: Option<String>,
}

/// `lineNumber` as written: text, or a number where the format has them.
/// Any other value reads as 0 instead of failing the document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LineText {
    Number(u64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl LineText {
    fn value(&self) -> usize {
        match self {
            LineText::Number(n) => usize::try_from(*n).unwrap_or(usize::MAX),
            // Saturating cast: negative and NaN become 0, fractions truncate.
            LineText::Float(f) => *f as usize,
            LineText::Text(s) => parse_leading_number(s).unwrap_or(0),
            LineText::Other(_) => 0,
        }
    }
}

impl Record {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            file_name: None,
            line_number: None,
            symbol_name: None,
        }
    }

    /// Set a child field by its document name. Unknown names are ignored.
    pub fn with_field(mut self, name: &str, text: &str) -> Self {
        let text = Some(text.to_string());
        match name {
            "id" => self.id = text,
            "fileName" => self.file_name = text,
            "lineNumber" => self.line_number = text.map(LineText::Text),
            "symbolName" => self.symbol_name = text,
            _ => {}
        }
        self
    }

    /// Build the rule this record describes, or `None` for other tags.
    ///
    /// Missing fields are empty; a missing or unreadable `lineNumber` is 0.
    pub fn to_suppression(&self) -> Option<Suppression> {
        if self.tag != RULE_TAG {
            return None;
        }
        let file_name = self.file_name.as_deref().map(path::normalize);
        Some(
            Suppression::new(
                self.id.clone().unwrap_or_default(),
                file_name.unwrap_or_default(),
                self.line_number.as_ref().map_or(0, LineText::value),
            )
            .with_symbol(self.symbol_name.clone().unwrap_or_default()),
        )
    }
}

/// Decode a structured rule document: `.toml` files with `toml`, everything
/// else as JSON.
pub fn load(file: &Path) -> Result<Document, SuppressionError> {
    let content =
        std::fs::read_to_string(file).map_err(|e| SuppressionError::from_io(file, e))?;
    let is_toml = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    let decoded: Result<Document, String> = if is_toml {
        toml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };
    decoded.map_err(|message| SuppressionError::Decode {
        path: file.to_path_buf(),
        message,
    })
}
