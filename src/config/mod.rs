use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::suppress::Suppressions;

pub const CONFIG_FILE: &str = ".suppressorrc.toml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub format: OutputFormat,
    /// Rule text file, one `id[:file[:line]]` per line.
    pub suppressions_file: Option<PathBuf>,
    /// Structured rule document (JSON or TOML).
    pub structured_file: Option<PathBuf>,
    /// Inline rule lines.
    pub suppress: Vec<String>,
    pub report_unmatched: bool,
    pub unused_function_checking: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            suppressions_file: None,
            structured_file: None,
            suppress: Vec::new(),
            report_unmatched: true,
            unused_function_checking: false,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let path = config_path.map(Path::to_path_buf).or_else(|| {
            let default = project_root.join(CONFIG_FILE);
            default.exists().then_some(default)
        });

        match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                let mut config: Config = toml::from_str(&content)
                    .map_err(|e| anyhow::anyhow!("Config parse error: {e}"))?;
                config.resolve_paths(path.parent().unwrap_or(project_root));
                tracing::debug!(config = %path.display(), "loaded config");
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }

    /// Rule file paths in a config file are relative to that file.
    fn resolve_paths(&mut self, base: &Path) {
        for file in [&mut self.suppressions_file, &mut self.structured_file]
            .into_iter()
            .flatten()
        {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }

    /// Load every rule source the config names into one registry.
    ///
    /// Order: rule file, structured document, inline rules.
    pub fn build_suppressions(&self) -> Result<Suppressions> {
        let mut suppressions = Suppressions::new();
        if let Some(file) = &self.suppressions_file {
            suppressions.parse_file(file)?;
        }
        if let Some(file) = &self.structured_file {
            suppressions.parse_structured_file(file)?;
        }
        for line in &self.suppress {
            suppressions.add_suppression_line(line)?;
        }
        tracing::info!(rules = suppressions.len(), "suppressions loaded");
        Ok(suppressions)
    }

    pub const fn default_toml() -> &'static str {
        r#"# suppressor configuration

# Rule file with one suppression per line: id[:file[:line]]
# Blank lines and lines starting with // are ignored.
# suppressions_file = "suppressions.txt"

# Structured rule document (JSON, or TOML when the extension is .toml)
# structured_file = "suppressions.json"

# Inline rules, same format as the rule file
suppress = []

# Report rules that never suppressed anything
report_unmatched = true

# Also report unmatched unusedFunction rules
unused_function_checking = false
"#
    }
}
