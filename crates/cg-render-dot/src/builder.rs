//! Incremental writer for Graphviz DOT text.

use std::fmt::Write;

/// Quotes a DOT identifier or attribute value.
///
/// Backslashes are kept as written so escapes such as `\(` reach Graphviz
/// untouched; only `"` is escaped, and a dangling trailing backslash is
/// doubled so it cannot swallow the closing quote.
#[must_use]
pub(crate) fn quote(input: &str) -> String {
    let mut quoted = String::with_capacity(input.len() + 2);
    quoted.push('"');
    let mut trailing_backslashes = 0_usize;
    for ch in input.chars() {
        match ch {
            '"' if trailing_backslashes % 2 == 0 => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            other => quoted.push(other),
        }
        trailing_backslashes = if ch == '\\' {
            trailing_backslashes + 1
        } else {
            0
        };
    }
    if trailing_backslashes % 2 == 1 {
        quoted.push('\\');
    }
    quoted.push('"');
    quoted
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

fn write_attrs(output: &mut String, attrs: &[(&str, &str)]) {
    let mut first = true;
    for (key, value) in attrs.iter().filter(|(_, value)| !value.is_empty()) {
        if !first {
            output.push_str(", ");
        }
        first = false;
        let _ = write!(output, "{key}={}", quote(value));
    }
}

pub(crate) struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    pub(crate) fn new(strict: bool, name: Option<&str>) -> Self {
        let mut output = String::with_capacity(4096);
        if strict {
            output.push_str("strict ");
        }
        output.push_str("digraph ");
        if let Some(name) = name {
            output.push_str(&quote(name));
            output.push(' ');
        }
        output.push_str("{\n");
        Self { output, indent: 1 }
    }

    /// Default attributes for every node, e.g. `node [shape="box"];`.
    pub(crate) fn node_defaults(&mut self, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        self.output.push_str("node [");
        write_attrs(&mut self.output, attrs);
        self.output.push_str("];\n");
        self
    }

    pub(crate) fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            return self;
        }
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{key}={};", quote(value));
        self
    }

    pub(crate) fn node(&mut self, id: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        self.output.push_str(&quote(id));
        if attrs.iter().any(|(_, value)| !value.is_empty()) {
            self.output.push_str(" [");
            write_attrs(&mut self.output, attrs);
            self.output.push(']');
        }
        self.output.push_str(";\n");
        self
    }

    pub(crate) fn edge(&mut self, from: &str, to: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{} -> {}", quote(from), quote(to));
        if attrs.iter().any(|(_, value)| !value.is_empty()) {
            self.output.push_str(" [");
            write_attrs(&mut self.output, attrs);
            self.output.push(']');
        }
        self.output.push_str(";\n");
        self
    }

    /// `{rank=same; "a"; "b";}`
    pub(crate) fn same_rank<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        self.output.push_str("{rank=same;");
        for id in ids {
            let _ = write!(self.output, " {};", quote(id));
        }
        self.output.push_str("}\n");
        self
    }

    pub(crate) fn start_cluster(&mut self, id: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "subgraph {} {{", quote(id));
        self.indent += 1;
        self
    }

    pub(crate) fn end_cluster(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        write_indent(&mut self.output, self.indent);
        self.output.push_str("}\n");
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    pub(crate) fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::{DotBuilder, quote};

    #[test]
    fn quote_escapes_double_quotes() {
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn quote_keeps_existing_escapes() {
        assert_eq!(quote("f\\(x\\)"), "\"f\\(x\\)\"");
        assert_eq!(quote("already \\\" escaped"), "\"already \\\" escaped\"");
    }

    #[test]
    fn quote_closes_after_trailing_backslash() {
        assert_eq!(quote("dir\\"), "\"dir\\\\\"");
    }

    #[test]
    fn builder_skips_empty_attributes() {
        let mut builder = DotBuilder::new(false, None);
        builder
            .node("a", &[("color", "")])
            .node("b", &[("color", "red"), ("fontcolor", "")])
            .edge("a", "b", &[("color", "")]);
        let dot = builder.build();
        assert_eq!(
            dot,
            "digraph {\n  \"a\";\n  \"b\" [color=\"red\"];\n  \"a\" -> \"b\";\n}\n"
        );
    }

    #[test]
    fn clusters_indent_their_body() {
        let mut builder = DotBuilder::new(true, Some("g"));
        builder
            .start_cluster("cluster_0")
            .attr("label", "root")
            .same_rank(["a", "b"])
            .end_cluster();
        let dot = builder.build();
        assert_eq!(
            dot,
            "strict digraph \"g\" {\n  subgraph \"cluster_0\" {\n    label=\"root\";\n    {rank=same; \"a\"; \"b\";}\n  }\n}\n"
        );
    }
}
