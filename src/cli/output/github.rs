use crate::types::{CheckResult, Severity};

pub fn render(result: &CheckResult) {
    for d in &result.diagnostics {
        let level = match d.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "notice",
        };

        println!(
            "::{level} file={file},line={line},title={id}::{message}",
            file = d.file,
            line = d.line,
            id = d.id,
            message = d.message,
        );
    }

    for rule in &result.unmatched {
        if rule.file_name.is_empty() {
            println!("::notice title=unmatched-suppression::{rule}");
        } else {
            println!(
                "::notice file={file},line={line},title=unmatched-suppression::{rule}",
                file = rule.file_name,
                line = rule.line_number,
            );
        }
    }
}
