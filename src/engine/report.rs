use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::types::Diagnostic;

/// A diagnostics report: a bare array, or an object with a `diagnostics`
/// array (the shape the JSON renderer writes).
#[derive(Deserialize)]
#[serde(untagged)]
enum Report {
    List(Vec<Diagnostic>),
    Wrapped { diagnostics: Vec<Diagnostic> },
}

/// Read diagnostics from `input`, or from stdin when it is `-`.
pub fn read(input: &Path) -> Result<Vec<Diagnostic>> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read diagnostics from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read diagnostics {}", input.display()))?
    };
    parse(&content).with_context(|| format!("Invalid diagnostics report {}", input.display()))
}

pub(crate) fn parse(content: &str) -> Result<Vec<Diagnostic>> {
    let report: Report = serde_json::from_str(content)?;
    Ok(match report {
        Report::List(diagnostics) | Report::Wrapped { diagnostics } => diagnostics,
    })
}
