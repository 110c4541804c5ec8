pub mod report;

use anyhow::Result;
use rayon::prelude::*;
use std::path::Path;

use crate::config::Config;
use crate::suppress::Suppressions;
use crate::types::{CheckResult, Diagnostic};

pub fn run(input: &Path, config: &Config) -> Result<CheckResult> {
    let diagnostics = report::read(input)?;
    let suppressions = config.build_suppressions()?;
    Ok(apply(diagnostics, &suppressions, config))
}

/// Drop every diagnostic a rule suppresses and collect the rules that
/// never fired.
pub fn apply(
    diagnostics: Vec<Diagnostic>,
    suppressions: &Suppressions,
    config: &Config,
) -> CheckResult {
    let total = diagnostics.len();
    let mut kept: Vec<Diagnostic> = diagnostics
        .into_par_iter()
        .filter(|d| !suppressions.is_suppressed(&d.error_message()))
        .collect();
    let suppressed = total - kept.len();

    kept.sort_by(|a, b| {
        (&a.file, a.line, &a.id, &a.message).cmp(&(&b.file, b.line, &b.id, &b.message))
    });

    let unmatched = if config.report_unmatched {
        suppressions
            .unmatched(config.unused_function_checking)
            .into_iter()
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    let result = CheckResult {
        suppressed,
        diagnostics: kept,
        unmatched,
    };
    tracing::info!(
        total,
        suppressed = result.suppressed,
        unmatched = result.unmatched.len(),
        "applied suppressions"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn diag(id: &str, file: &str, line: usize) -> Diagnostic {
        Diagnostic {
            id: id.to_string(),
            file: file.to_string(),
            line,
            severity: Severity::Error,
            message: format!("{id} at {file}:{line}"),
            symbols: Vec::new(),
        }
    }

    fn rules(text: &str) -> Suppressions {
        let mut s = Suppressions::new();
        s.parse_text(text).unwrap();
        s
    }

    #[test]
    fn test_apply_drops_suppressed() {
        let s = rules("nullPointer:src/*.c\n");
        let result = apply(
            vec![
                diag("nullPointer", "src/a.c", 3),
                diag("nullPointer", "lib/a.c", 3),
                diag("memleak", "src/a.c", 9),
            ],
            &s,
            &Config::default(),
        );
        assert_eq!(result.suppressed, 1);
        let ids: Vec<_> = result
            .diagnostics
            .iter()
            .map(|d| format!("{}:{}", d.id, d.file))
            .collect();
        assert_eq!(ids, vec!["nullPointer:lib/a.c", "memleak:src/a.c"]);
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn test_apply_reports_unmatched() {
        let s = rules("memleak\nunusedFunction\nuninitvar:src/b.c:4\n");
        let result = apply(vec![diag("memleak", "a.c", 1)], &s, &Config::default());
        let unmatched: Vec<_> = result.unmatched.iter().map(ToString::to_string).collect();
        assert_eq!(unmatched, vec!["uninitvar:src/b.c:4"]);
    }

    #[test]
    fn test_apply_unused_function_checking() {
        let s = rules("unusedFunction\n");
        let config = Config {
            unused_function_checking: true,
            ..Config::default()
        };
        let result = apply(Vec::new(), &s, &config);
        assert_eq!(result.unmatched.len(), 1);
    }

    #[test]
    fn test_apply_without_unmatched_report() {
        let s = rules("memleak\n");
        let config = Config {
            report_unmatched: false,
            ..Config::default()
        };
        let result = apply(Vec::new(), &s, &config);
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn test_apply_keeps_identical_diagnostics() {
        let result = apply(
            vec![
                diag("memleak", "a.c", 1),
                diag("memleak", "a.c", 1),
                diag("uninitvar", "a.c", 1),
            ],
            &rules("uninitvar\n"),
            &Config::default(),
        );
        assert_eq!(result.diagnostics.len(), 2);
        assert_eq!(result.suppressed, 1);
        assert_eq!(result.diagnostics.len() + result.suppressed, 3);
    }

    #[test]
    fn test_run_reads_report_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.json");
        std::fs::write(
            &input,
            r#"[{"id": "uninitvar", "file": "src/a.c", "line": 2, "symbols": ["buf"]},
                {"id": "uninitvar", "file": "src/a.c", "line": 5, "symbols": ["len"]}]"#,
        )
        .unwrap();

        let config = Config {
            suppress: vec!["uninitvar:src/a.c:2".to_string()],
            ..Config::default()
        };
        let result = run(&input, &config).unwrap();
        assert_eq!(result.suppressed, 1);
        assert_eq!(result.diagnostics[0].line, 5);
    }
}
