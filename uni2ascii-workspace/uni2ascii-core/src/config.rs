// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::residual::ResidualPolicy;
use crate::table::{Table, parse_entries};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Uni2AsciiConfig {
    #[serde(default)]
    pub residual: ResidualPolicy,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Uni2AsciiConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let mut cfg = if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            toml::from_str::<Uni2AsciiConfig>(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?
        } else {
            tracing::info!(
                "No config file found at {}. Using Uni2AsciiConfig::default().",
                path.display()
            );
            Uni2AsciiConfig::default()
        };
        if let Some(root) = path.parent() {
            cfg.resolve_paths(root);
        }
        Ok(cfg)
    }

    fn resolve_paths(&mut self, root: &Path) {
        if let Some(extra) = self.table.extra.as_mut() {
            *extra = absolutize(root, extra);
        }
    }

    /// Builtin table, plus the extra entries file when one is configured.
    pub fn build_table(&self) -> Result<Table> {
        match &self.table.extra {
            None => Ok(Table::builtin()?),
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading table file {}", path.display()))?;
                let extra = parse_entries(&text)
                    .with_context(|| format!("parsing table file {}", path.display()))?;
                tracing::debug!(entries = extra.len(), path = %path.display(), "loaded extra table");
                Ok(Table::with_overrides(extra)?)
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub trim: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { trim: false }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TableConfig {
    #[serde(default)]
    pub extra: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_level")]
    pub level: String,
}

impl LogConfig {
    fn default_level() -> String {
        "warn".to_string()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

fn absolutize(root: &Path, value: &Path) -> PathBuf {
    if value.is_absolute() {
        value.to_path_buf()
    } else {
        root.join(value)
    }
}
