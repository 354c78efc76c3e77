#![forbid(unsafe_code)]

mod config;

pub use config::{EdgeColorSource, OutlineConfig};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OutlineErrorCode {
    #[default]
    PaletteField,
}

impl OutlineErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PaletteField => "outline/error/palette-field",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Error, PartialEq, Eq)]
pub enum OutlineError {
    #[error("line {line}: palette field '{field}' has no ':' separator")]
    MalformedPaletteField { field: String, line: usize },
}

impl OutlineError {
    #[must_use]
    pub const fn code(&self) -> OutlineErrorCode {
        match self {
            Self::MalformedPaletteField { .. } => OutlineErrorCode::PaletteField,
        }
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MalformedPaletteField { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum OutlineWarningCode {
    #[default]
    MalformedHeader,
    EmptyName,
    DisconnectedNode,
    DepthSkip,
    ColorConflict,
}

impl OutlineWarningCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedHeader => "outline/warn/malformed-header",
            Self::EmptyName => "outline/warn/empty-name",
            Self::DisconnectedNode => "outline/warn/disconnected-node",
            Self::DepthSkip => "outline/warn/depth-skip",
            Self::ColorConflict => "outline/warn/color-conflict",
        }
    }
}

/// A non-fatal observation made while parsing. Warnings never change the
/// resulting document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OutlineWarning {
    pub code: OutlineWarningCode,
    pub message: String,
    /// 1-based source line the warning refers to.
    pub line: usize,
}

impl OutlineWarning {
    #[must_use]
    pub fn new(code: OutlineWarningCode, line: usize, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            line,
        }
    }
}

impl std::fmt::Display for OutlineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Symbolic color name to concrete color value, declared by the optional
/// `[name:value, ...]` header line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Palette(BTreeMap<String, String>);

impl Palette {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous value when `name` was already declared.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Substitutes a declared color, passing unknown tokens through unchanged.
    #[must_use]
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.get(token).unwrap_or(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Palette {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Node {
    pub name: String,
    pub color: String,
    /// Depth of the shallowest occurrence of this name.
    pub rank: usize,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>, rank: usize) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            rank,
        }
    }
}

/// Edges compare on all three fields; two edges collapse only when source,
/// destination and color all match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Edge {
    pub src: String,
    pub dst: String,
    pub color: String,
}

impl Edge {
    #[must_use]
    pub fn new(src: impl Into<String>, dst: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            color: color.into(),
        }
    }
}

/// Node names sharing one rank inside a subgraph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RankBucket {
    pub rank: usize,
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Subgraph {
    pub root: Node,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranks: Vec<RankBucket>,
}

impl Subgraph {
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.name == name)
    }

    #[must_use]
    pub fn has_edge(&self, src: &str, dst: &str) -> bool {
        self.edges.iter().any(|edge| edge.src == src && edge.dst == dst)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Document {
    pub palette: Palette,
    pub subgraphs: Vec<Subgraph>,
}

impl Document {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.subgraphs.iter().map(|subgraph| subgraph.nodes.len()).sum()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.subgraphs.iter().map(|subgraph| subgraph.edges.len()).sum()
    }
}
