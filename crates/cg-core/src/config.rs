//! Outline parsing configuration.

use serde::{Deserialize, Serialize};

/// Which line's color tag an inferred edge takes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EdgeColorSource {
    /// The nested line that declares the edge.
    #[default]
    Child,
    /// The ancestor line the edge starts from; this is how `cgraph` 0.1 colored edges.
    Parent,
}

/// Knobs for the outline normalizer and resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutlineConfig {
    /// Leading spaces per nesting level.
    pub indent_width: usize,
    /// Spaces a tab expands to.
    pub tab_width: usize,
    /// A line containing any of these anywhere is dropped.
    pub comment_markers: Vec<String>,
    /// Color source for inferred edges.
    pub edge_color: EdgeColorSource,
    /// Replace `:`, `(` and `)` so names survive the DOT description syntax.
    pub escape_syntax: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            tab_width: 4,
            comment_markers: vec!["#".to_string(), "//".to_string()],
            edge_color: EdgeColorSource::Child,
            escape_syntax: true,
        }
    }
}

impl OutlineConfig {
    /// Depth for a given count of leading spaces.
    #[must_use]
    pub fn depth_for(&self, leading_spaces: usize) -> usize {
        leading_spaces / self.indent_width.max(1)
    }

    #[must_use]
    pub fn is_comment(&self, line: &str) -> bool {
        self.comment_markers
            .iter()
            .filter(|marker| !marker.is_empty())
            .any(|marker| line.contains(marker.as_str()))
    }
}
