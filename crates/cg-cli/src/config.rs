//! Optional TOML configuration for the CLI.
//!
//! ```toml
//! dot_command = "/usr/local/bin/dot"
//!
//! [outline]
//! indent_width = 2
//! edge_color = "parent"
//!
//! [render]
//! node_shape = "note"
//! rank_alignment = false
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use cg_core::OutlineConfig;
use cg_render_dot::DotRenderConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    /// Graphviz executable used to lay out and rasterize the DOT output.
    pub dot_command: String,
    pub outline: OutlineConfig,
    pub render: DotRenderConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            dot_command: "dot".to_string(),
            outline: OutlineConfig::default(),
            render: DotRenderConfig::default(),
        }
    }
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
