#![forbid(unsafe_code)]

//! Graphviz DOT emitter for colored-graph documents.
//!
//! Each subgraph becomes a `cluster_` subgraph labelled and bordered by its
//! root; node and edge colors are already palette-resolved in the document.
//! Layout and image output are left to the `dot` tool.

mod builder;

use cg_core::{Document, Subgraph};
use serde::{Deserialize, Serialize};

use crate::builder::DotBuilder;

/// Configuration for DOT emission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DotRenderConfig {
    /// Emit `strict digraph`, merging parallel edges.
    pub strict: bool,
    /// Optional graph name after the `digraph` keyword.
    pub graph_name: Option<String>,
    /// Default node shape.
    pub node_shape: String,
    /// Emit `{rank=same; ...}` for nodes sharing a rank.
    pub rank_alignment: bool,
    /// Color node labels with the node color too.
    pub font_colors: bool,
}

impl Default for DotRenderConfig {
    fn default() -> Self {
        Self {
            strict: true,
            graph_name: None,
            node_shape: "box".to_string(),
            rank_alignment: true,
            font_colors: true,
        }
    }
}

#[must_use]
pub fn render_dot(document: &Document) -> String {
    render_dot_with_config(document, &DotRenderConfig::default())
}

#[must_use]
pub fn render_dot_with_config(document: &Document, config: &DotRenderConfig) -> String {
    let mut builder = DotBuilder::new(config.strict, config.graph_name.as_deref());
    builder.node_defaults(&[("shape", config.node_shape.as_str())]);

    for (index, subgraph) in document.subgraphs.iter().enumerate() {
        builder.blank();
        write_cluster(&mut builder, index, subgraph, config);
    }

    builder.build()
}

fn write_cluster(
    builder: &mut DotBuilder,
    index: usize,
    subgraph: &Subgraph,
    config: &DotRenderConfig,
) {
    let root = &subgraph.root;
    builder
        .start_cluster(&format!("cluster_{index}"))
        .attr("label", &root.name)
        .attr("color", &root.color);

    if !root.name.is_empty() {
        write_node(builder, &root.name, &root.color, root.rank, config);
    }
    for node in &subgraph.nodes {
        write_node(builder, &node.name, &node.color, node.rank, config);
    }
    for edge in &subgraph.edges {
        builder.edge(&edge.src, &edge.dst, &[("color", edge.color.as_str())]);
    }

    if config.rank_alignment {
        for bucket in subgraph.ranks.iter().filter(|bucket| bucket.nodes.len() > 1) {
            builder.same_rank(bucket.nodes.iter().map(String::as_str));
        }
    }

    builder.end_cluster();
}

fn write_node(builder: &mut DotBuilder, name: &str, color: &str, rank: usize, config: &DotRenderConfig) {
    let group = rank.to_string();
    let fontcolor = if config.font_colors { color } else { "" };
    builder.node(
        name,
        &[
            ("color", color),
            ("fontcolor", fontcolor),
            ("group", group.as_str()),
        ],
    );
}
