pub mod github;
pub mod json;
pub mod text;

use crate::cli::OutputFormat;
use crate::types::CheckResult;

pub fn render(result: &CheckResult, format: OutputFormat) {
    match format {
        OutputFormat::Text => text::render(result),
        OutputFormat::Json => json::render(result),
        OutputFormat::Github => github::render(result),
    }
}
