use owo_colors::OwoColorize;
use std::collections::{BTreeMap, HashSet};

use crate::types::{CheckResult, Severity};

pub fn render(result: &CheckResult) {
    println!();
    println!("  {}", "\u{2501}".repeat(50).dimmed());
    if result.diagnostics.is_empty() {
        println!("  {}", "no issues found".green());
    } else {
        render_summary(result);
    }
    if result.suppressed > 0 {
        println!(
            "  {}",
            format!("{} suppressed", result.suppressed).dimmed()
        );
    }
    println!("  {}", "\u{2501}".repeat(50).dimmed());

    render_diagnostics(result);
    render_unmatched(result);
    println!();
}

fn render_summary(result: &CheckResult) {
    let errors = result.error_count();
    let warnings = result.warning_count();
    let infos = result.info_count();

    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(format!("{errors} errors").red().bold().to_string());
    }
    if warnings > 0 {
        parts.push(format!("{warnings} warnings").yellow().bold().to_string());
    }
    if infos > 0 {
        parts.push(format!("{infos} info").blue().to_string());
    }
    let file_count = result
        .diagnostics
        .iter()
        .map(|d| &d.file)
        .collect::<HashSet<_>>()
        .len();
    println!("  {} across {} files", parts.join(", "), file_count.bold());
}

fn render_diagnostics(result: &CheckResult) {
    let mut by_id: BTreeMap<_, Vec<_>> = BTreeMap::new();
    for d in &result.diagnostics {
        by_id.entry(d.id.as_str()).or_default().push(d);
    }

    let worst = |id: &str| -> u8 {
        by_id.get(id).map_or(3, |diags| {
            diags
                .iter()
                .map(|d| match d.severity {
                    Severity::Error => 0,
                    Severity::Warning => 1,
                    Severity::Info => 2,
                })
                .min()
                .unwrap_or(3)
        })
    };

    let mut ids: Vec<_> = by_id.keys().copied().collect();
    ids.sort_by_key(|&id| (worst(id), id));

    for id in ids {
        let diags = &by_id[id];
        let severity = diags
            .iter()
            .map(|d| d.severity)
            .max()
            .unwrap_or(Severity::Info);

        let (icon, label) = match severity {
            Severity::Error => ("\u{2717}".red().to_string(), id.red().bold().to_string()),
            Severity::Warning => (
                "\u{26a0}".yellow().to_string(),
                id.yellow().bold().to_string(),
            ),
            Severity::Info => ("\u{2139}".blue().to_string(), id.blue().bold().to_string()),
        };

        println!();
        println!(
            "  {} {} {}",
            icon,
            label,
            format!("({})", diags.len()).dimmed()
        );

        let mut by_file: BTreeMap<_, Vec<_>> = BTreeMap::new();
        for d in diags {
            by_file.entry(d.file.as_str()).or_default().push(d);
        }
        for (file, file_diags) in &by_file {
            println!("    {}", file.dimmed());
            for d in file_diags {
                println!("      L{:<4} {}", d.line, d.message);
            }
        }
    }
}

fn render_unmatched(result: &CheckResult) {
    if result.unmatched.is_empty() {
        return;
    }
    println!();
    println!(
        "  {} {} {}",
        "\u{2139}".blue(),
        "unmatched suppressions".blue().bold(),
        format!("({})", result.unmatched.len()).dimmed()
    );
    for rule in &result.unmatched {
        println!("    {rule}");
    }
}
