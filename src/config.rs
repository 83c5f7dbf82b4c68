use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Settings of a single check run
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Flow executable, used verbatim when set
    pub flow_bin: Option<String>,
    /// Suffix for the report title
    pub subtitle: Option<String>,
    /// Directory flow runs in (current directory when unset)
    pub working_directory: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
        let config = toml::from_str(&content).with_context(|| format!("Failed to parse {}", path))?;
        Ok(config)
    }

    /// Build the run configuration: file values first, CLI and environment on top
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let base = if Path::new(&cli.config).exists() {
            Self::load(&cli.config)?
        } else {
            Self::default()
        };
        Ok(base.merge_cli(cli).normalized())
    }

    fn merge_cli(self, cli: &Cli) -> Self {
        let flow_bin = non_empty(&cli.flow_bin_flag).or(non_empty(&cli.flow_bin));
        Self {
            flow_bin: flow_bin.or(self.flow_bin),
            subtitle: non_empty(&cli.subtitle).or(self.subtitle),
            working_directory: non_empty(&cli.working_directory)
                .map(PathBuf::from)
                .or(self.working_directory),
        }
    }

    /// Treat empty values as unset
    fn normalized(self) -> Self {
        Self {
            flow_bin: self.flow_bin.filter(|s| !s.trim().is_empty()),
            subtitle: self.subtitle.filter(|s| !s.is_empty()),
            working_directory: self
                .working_directory
                .filter(|p| !p.as_os_str().is_empty()),
        }
    }
}

/// Empty CLI or environment values do not override the config file
fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|s| !s.is_empty())
}
