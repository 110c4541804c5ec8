use serde::Serialize;

use crate::suppress::Suppression;
use crate::types::{CheckResult, Diagnostic};

#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: &'a [Diagnostic],
    unmatched: Vec<JsonRule<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRule<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    file_name: &'a str,
    #[serde(skip_serializing_if = "is_zero")]
    line_number: usize,
    #[serde(skip_serializing_if = "is_empty")]
    symbol_name: &'a str,
}

#[derive(Serialize)]
struct JsonSummary {
    errors: usize,
    warnings: usize,
    info: usize,
    suppressed: usize,
}

fn is_empty(s: &&str) -> bool {
    s.is_empty()
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl<'a> From<&'a Suppression> for JsonRule<'a> {
    fn from(rule: &'a Suppression) -> Self {
        Self {
            id: &rule.error_id,
            file_name: &rule.file_name,
            line_number: rule.line_number,
            symbol_name: &rule.symbol_name,
        }
    }
}

fn build_output(result: &CheckResult) -> JsonOutput<'_> {
    JsonOutput {
        diagnostics: &result.diagnostics,
        unmatched: result.unmatched.iter().map(JsonRule::from).collect(),
        summary: JsonSummary {
            errors: result.error_count(),
            warnings: result.warning_count(),
            info: result.info_count(),
            suppressed: result.suppressed,
        },
    }
}

pub fn render(result: &CheckResult) {
    let output = build_output(result);
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!("failed to serialize report: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    #[test]
    fn test_json_output_is_valid() {
        let result = CheckResult {
            diagnostics: vec![Diagnostic {
                id: "nullPointer".to_string(),
                file: "src/a.c".to_string(),
                line: 10,
                severity: Severity::Error,
                message: "null pointer dereference".to_string(),
                symbols: Vec::new(),
            }],
            suppressed: 2,
            unmatched: vec![Suppression::parse_line("memleak:src/b.c:4")],
        };

        let output = build_output(&result);
        let json = serde_json::to_string_pretty(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["summary"]["errors"], 1);
        assert_eq!(parsed["summary"]["suppressed"], 2);
        assert_eq!(parsed["diagnostics"][0]["severity"], "error");
        assert_eq!(parsed["unmatched"][0]["id"], "memleak");
        assert_eq!(parsed["unmatched"][0]["fileName"], "src/b.c");
        assert_eq!(parsed["unmatched"][0]["lineNumber"], 4);
        assert!(parsed["unmatched"][0].get("symbolName").is_none());
    }

    #[test]
    fn test_json_output_reads_back_as_report() {
        let result = CheckResult {
            diagnostics: vec![Diagnostic {
                id: "uninitvar".to_string(),
                file: "a.c".to_string(),
                line: 1,
                severity: Severity::Warning,
                message: "x".to_string(),
                symbols: vec!["x".to_string()],
            }],
            ..CheckResult::default()
        };
        let json = serde_json::to_string(&build_output(&result)).unwrap();
        let read_back = crate::engine::report::parse(&json).unwrap();
        assert_eq!(read_back, result.diagnostics);
    }
}
