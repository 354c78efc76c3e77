use std::collections::{BTreeMap, BTreeSet};

use cg_core::{
    Document, Edge, EdgeColorSource, Node, OutlineConfig, OutlineWarning, OutlineWarningCode,
    Palette, RankBucket, Subgraph,
};
use tracing::debug;

use crate::ParseResult;
use crate::dedup::dedup_nodes;
use crate::normalize::OutlineLine;
use crate::resolver::infer_parents;
use crate::split::{split_color_tag, split_root};

/// A body line after its color tag has been split off.
struct Entry<'a> {
    name: &'a str,
    color: &'a str,
    depth: usize,
    line: usize,
}

pub(crate) struct DocumentBuilder<'c> {
    config: &'c OutlineConfig,
    document: Document,
    warnings: Vec<OutlineWarning>,
}

impl<'c> DocumentBuilder<'c> {
    pub(crate) fn new(config: &'c OutlineConfig, palette: Palette) -> Self {
        Self {
            config,
            document: Document {
                palette,
                subgraphs: Vec::new(),
            },
            warnings: Vec::new(),
        }
    }

    pub(crate) fn extend_warnings(&mut self, warnings: impl IntoIterator<Item = OutlineWarning>) {
        self.warnings.extend(warnings);
    }

    pub(crate) fn finish(mut self) -> ParseResult {
        self.warnings.sort_by_key(|warning| warning.line);
        ParseResult {
            document: self.document,
            warnings: self.warnings,
        }
    }

    /// Turns one root-led block into a subgraph with resolved colors.
    pub(crate) fn push_subgraph(&mut self, block: &[OutlineLine]) {
        let Some((root_line, body)) = block.split_first() else {
            return;
        };
        let mut warnings = Vec::new();

        let (root_color, root_name) = split_root(&root_line.text);
        let mut entries = Vec::with_capacity(body.len());
        for line in body {
            let (color, name) = split_color_tag(&line.text);
            if name.is_empty() {
                warnings.push(OutlineWarning::new(
                    OutlineWarningCode::EmptyName,
                    line.line,
                    format!("line has color '{color}' but no name"),
                ));
            }
            entries.push(Entry {
                name,
                color,
                depth: line.depth,
                line: line.line,
            });
        }

        let palette = &self.document.palette;
        let depths: Vec<usize> = std::iter::once(0)
            .chain(entries.iter().map(|entry| entry.depth))
            .collect();
        let parents = infer_parents(&depths);

        let mut edges = Vec::new();
        let mut seen_edges = BTreeSet::new();
        for (entry, parent) in entries.iter().zip(parents.iter().skip(1)) {
            let Some(parent_index) = *parent else {
                warnings.push(OutlineWarning::new(
                    OutlineWarningCode::DisconnectedNode,
                    entry.line,
                    format!(
                        "'{}' has no shallower ancestor under root '{root_name}'",
                        entry.name
                    ),
                ));
                continue;
            };

            let (parent_name, parent_color, parent_depth) = if parent_index == 0 {
                (root_name, root_color, 0)
            } else {
                let parent = &entries[parent_index - 1];
                (parent.name, parent.color, parent.depth)
            };

            if entry.depth > parent_depth + 1 {
                warnings.push(OutlineWarning::new(
                    OutlineWarningCode::DepthSkip,
                    entry.line,
                    format!(
                        "'{}' is at depth {} but its parent '{parent_name}' is at depth {parent_depth}",
                        entry.name, entry.depth
                    ),
                ));
            }

            let tag = match self.config.edge_color {
                EdgeColorSource::Child => entry.color,
                EdgeColorSource::Parent => parent_color,
            };
            let edge = Edge::new(parent_name, entry.name, palette.resolve(tag));
            if seen_edges.insert(edge.clone()) {
                edges.push(edge);
            }
        }

        warnings.extend(color_conflicts(&entries));

        let root = Node::new(root_name, palette.resolve(root_color), 0);
        let nodes = dedup_nodes(
            entries
                .iter()
                .map(|entry| Node::new(entry.name, palette.resolve(entry.color), entry.depth)),
        );
        let ranks = rank_buckets(&root, &nodes);

        debug!(
            "Subgraph '{}' (line {}): nodes={}, edges={}, ranks={}",
            root.name,
            root_line.line,
            nodes.len(),
            edges.len(),
            ranks.len()
        );

        self.document.subgraphs.push(Subgraph {
            root,
            nodes,
            edges,
            ranks,
        });
        self.warnings.extend(warnings);
    }
}

/// One warning per name that appears with more than one color tag.
fn color_conflicts(entries: &[Entry<'_>]) -> Vec<OutlineWarning> {
    let mut first_color: BTreeMap<&str, &str> = BTreeMap::new();
    let mut reported: BTreeSet<&str> = BTreeSet::new();
    let mut warnings = Vec::new();

    for entry in entries {
        let color = *first_color.entry(entry.name).or_insert(entry.color);
        if color != entry.color && reported.insert(entry.name) {
            warnings.push(OutlineWarning::new(
                OutlineWarningCode::ColorConflict,
                entry.line,
                format!(
                    "'{}' appears as both '{color}' and '{}'; the last color is kept",
                    entry.name, entry.color
                ),
            ));
        }
    }

    warnings
}

fn rank_buckets(root: &Node, nodes: &[Node]) -> Vec<RankBucket> {
    let mut by_rank: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for node in std::iter::once(root).chain(nodes) {
        by_rank.entry(node.rank).or_default().push(node.name.clone());
    }
    by_rank
        .into_iter()
        .map(|(rank, nodes)| RankBucket { rank, nodes })
        .collect()
}
