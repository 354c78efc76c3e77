#![forbid(unsafe_code)]

//! Outline to colored-graph transform.
//!
//! The input is an indentation outline whose lines read `<color> <name>`,
//! optionally preceded by a `[name:value, ...]` palette header. Every
//! unindented line roots its own subgraph; nesting depth decides parents.

mod builder;
mod dedup;
mod header;
mod normalize;
mod resolver;
mod segment;
mod split;

use cg_core::{Document, OutlineConfig, OutlineError, OutlineWarning, Palette};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::builder::DocumentBuilder;

pub use dedup::dedup_nodes;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub document: Document,
    pub warnings: Vec<OutlineWarning>,
}

/// Parses an outline with the default configuration.
pub fn parse(input: &str) -> Result<ParseResult, OutlineError> {
    parse_with_config(input, &OutlineConfig::default())
}

/// Parses an outline into a document of colored subgraphs.
///
/// The only fatal condition is a palette field without a `:` separator.
/// Everything else that looks off (unbalanced header brackets, skipped depth
/// levels, names with conflicting colors) is reported as a warning.
pub fn parse_with_config(
    input: &str,
    config: &OutlineConfig,
) -> Result<ParseResult, OutlineError> {
    let outline = normalize::normalize(input, config);

    let palette = match &outline.header {
        Some(header) => header::parse_palette(&header.text, header.line)?,
        None => Palette::new(),
    };

    let blocks = segment::split_subgraphs(&outline.lines);
    debug!(
        "Normalized outline: lines={}, blocks={}, palette_entries={}",
        outline.lines.len(),
        blocks.len(),
        palette.len()
    );

    let mut builder = DocumentBuilder::new(config, palette);
    builder.extend_warnings(outline.warnings.iter().cloned());
    for block in blocks {
        builder.push_subgraph(block);
    }

    Ok(builder.finish())
}

#[must_use]
pub fn parse_evidence_json(parsed: &ParseResult) -> String {
    json!({
        "subgraph_count": parsed.document.subgraphs.len(),
        "node_count": parsed.document.node_count(),
        "edge_count": parsed.document.edge_count(),
        "palette_count": parsed.document.palette.len(),
        "warning_count": parsed.warnings.len(),
        "warnings": parsed
            .warnings
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
    })
    .to_string()
}
