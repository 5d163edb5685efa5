//! TOML configuration for the `hashring` tool.
//!
//! When no config file is given, the ring starts empty with default settings
//! and nodes come from `--node` flags.

use std::path::Path;

use anyhow::{Context, bail};
use hashring_core::{NodeSpec, RingConfig};
use serde::Deserialize;

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Ring-wide settings.
    pub ring: RingConfig,
    /// Logging configuration.
    pub log: LogSection,
    /// Node specs to register, in order.
    pub nodes: Vec<NodeSpec>,
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`, `"warn"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or use defaults if no path given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("reading config {}", p.display()))?;
                let config: CliConfig = toml::from_str(&content)
                    .with_context(|| format!("parsing config {}", p.display()))?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML string (used in tests).
    #[cfg(test)]
    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Parse a `--node` argument of the form `key` or `key=vnodes`.
pub fn parse_node_arg(arg: &str) -> anyhow::Result<NodeSpec> {
    let (key, vnodes) = match arg.rsplit_once('=') {
        Some((key, count)) => {
            let count: u32 = count
                .trim()
                .parse()
                .with_context(|| format!("invalid virtual node count in {arg:?}"))?;
            (key.trim(), Some(count))
        }
        None => (arg.trim(), None),
    };
    if key.is_empty() {
        bail!("node key must not be empty in {arg:?}");
    }

    let spec = NodeSpec::new(key);
    Ok(match vnodes {
        Some(count) => spec.with_virtual_nodes(count),
        None => spec,
    })
}
