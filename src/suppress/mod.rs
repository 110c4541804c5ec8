//! Suppression rules and the engine that matches diagnostics against them.
//!
//! Rules are loaded once into a [`Suppressions`] registry, from rule-file
//! text (`id[:file[:line]]` per line) or from structured records, and then
//! queried for each diagnostic. Queries take `&self`: the only state they
//! touch is each rule's atomic `matched` flag, so a loaded registry can be
//! shared across threads.

pub mod glob;
pub mod rule;
pub mod structured;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::SuppressionError;
use crate::path;

pub use glob::matches;
pub use rule::{ErrorMessage, Suppression, ANY_ID, UNUSED_FUNCTION_ID};
pub use structured::{Record, RULE_TAG};

/// Which rules take part in an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Rules tied to one concrete file.
    Local,
    /// Rules with no file or a wildcard file pattern.
    Global,
    /// Every rule.
    All,
}

impl Scope {
    fn includes(self, local: bool) -> bool {
        match self {
            Scope::Local => local,
            Scope::Global => !local,
            Scope::All => true,
        }
    }
}

#[derive(Debug, Default)]
pub struct Suppressions {
    rules: Vec<Suppression>,
    /// `is_local()` of each rule, taken once at registration.
    local: Vec<bool>,
    /// Local rule indices keyed by file name.
    by_file: BTreeMap<String, Vec<usize>>,
}

impl Suppressions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `rule` and append it.
    pub fn add_suppression(&mut self, rule: Suppression) -> Result<(), SuppressionError> {
        rule.validate()?;
        tracing::trace!(rule = %rule, "added suppression");
        let local = rule.is_local();
        if local {
            self.by_file
                .entry(rule.file_name.clone())
                .or_default()
                .push(self.rules.len());
        }
        self.rules.push(rule);
        self.local.push(local);
        Ok(())
    }

    /// Parse a single `id[:file[:line]]` line and add it.
    pub fn add_suppression_line(&mut self, line: &str) -> Result<(), SuppressionError> {
        self.add_suppression(Suppression::parse_line(line))
    }

    /// Add every rule line in `text`.
    ///
    /// Blank lines and `//` comments are skipped and `\r` counts as a line
    /// break. Loading stops at the first invalid rule; rules before it stay.
    pub fn parse_text(&mut self, text: &str) -> Result<(), SuppressionError> {
        for line in text.split(['\n', '\r']) {
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            self.add_suppression_line(line)?;
        }
        Ok(())
    }

    /// Read a rule text file and add its rules.
    pub fn parse_file(&mut self, file: &Path) -> Result<(), SuppressionError> {
        let text =
            std::fs::read_to_string(file).map_err(|e| SuppressionError::from_io(file, e))?;
        let before = self.rules.len();
        self.parse_text(&text)?;
        tracing::debug!(
            file = %file.display(),
            rules = self.rules.len() - before,
            "loaded suppression file"
        );
        Ok(())
    }

    /// Add the rules carried by decoded structured records.
    ///
    /// Records with a tag other than [`RULE_TAG`] are skipped.
    pub fn add_records<'a, I>(&mut self, records: I) -> Result<(), SuppressionError>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        for record in records {
            match record.to_suppression() {
                Some(rule) => self.add_suppression(rule)?,
                None => tracing::debug!(tag = %record.tag, "skipping non-suppression record"),
            }
        }
        Ok(())
    }

    /// Load a structured rule document and add its rules.
    pub fn parse_structured_file(&mut self, file: &Path) -> Result<(), SuppressionError> {
        let document = structured::load(file)?;
        let before = self.rules.len();
        self.add_records(&document.suppressions)?;
        tracing::debug!(
            file = %file.display(),
            rules = self.rules.len() - before,
            "loaded structured suppressions"
        );
        Ok(())
    }

    /// Whether any rule suppresses `msg`.
    pub fn is_suppressed(&self, msg: &ErrorMessage) -> bool {
        self.is_suppressed_in(msg, Scope::All)
    }

    /// Whether a file-specific rule suppresses `msg`.
    pub fn is_suppressed_local(&self, msg: &ErrorMessage) -> bool {
        self.is_suppressed_in(msg, Scope::Local)
    }

    /// Scan the rules of `scope` in insertion order; the first match is
    /// marked and ends the scan.
    pub fn is_suppressed_in(&self, msg: &ErrorMessage, scope: Scope) -> bool {
        let hit = self.scoped(scope).find(|rule| rule.is_match(msg));
        if let Some(rule) = hit {
            tracing::trace!(rule = %rule, id = %msg.error_id, file = %msg.file_name, "suppressed");
        }
        hit.is_some()
    }

    /// Local rules for `file` that never matched.
    pub fn unmatched_local(&self, file: &str, include_unused_function: bool) -> Vec<&Suppression> {
        self.by_file
            .get(&path::normalize(file))
            .into_iter()
            .flatten()
            .map(|&i| &self.rules[i])
            .filter(|rule| is_reportable(rule, include_unused_function))
            .collect()
    }

    /// Global rules that never matched.
    pub fn unmatched_global(&self, include_unused_function: bool) -> Vec<&Suppression> {
        self.scoped(Scope::Global)
            .filter(|rule| is_reportable(rule, include_unused_function))
            .collect()
    }

    fn scoped(&self, scope: Scope) -> impl Iterator<Item = &Suppression> {
        self.rules
            .iter()
            .zip(&self.local)
            .filter(move |&(_, &local)| scope.includes(local))
            .map(|(rule, _)| rule)
    }

    /// Every unmatched rule, local ones grouped by file, then global ones.
    pub fn unmatched(&self, include_unused_function: bool) -> Vec<&Suppression> {
        let mut result: Vec<_> = self
            .by_file
            .keys()
            .flat_map(|file| self.unmatched_local(file, include_unused_function))
            .collect();
        result.extend(self.unmatched_global(include_unused_function));
        result
    }

    pub fn iter(&self) -> impl Iterator<Item = &Suppression> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn is_reportable(rule: &Suppression, include_unused_function: bool) -> bool {
    !rule.is_matched() && (include_unused_function || rule.error_id != UNUSED_FUNCTION_ID)
}
