use cg_core::{OutlineConfig, OutlineWarning, OutlineWarningCode};

/// Glyph standing in for `:` so names never read as DOT port references.
pub(crate) const COLON_PLACEHOLDER: char = 'ː';

/// One retained body line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutlineLine {
    /// Trimmed, escaped text: `<color> <name>`.
    pub(crate) text: String,
    pub(crate) depth: usize,
    /// 1-based line number in the source text.
    pub(crate) line: usize,
    /// Whether the line started with at least one space after tab expansion.
    pub(crate) indented: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderLine {
    pub(crate) text: String,
    pub(crate) line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Outline {
    pub(crate) header: Option<HeaderLine>,
    pub(crate) lines: Vec<OutlineLine>,
    pub(crate) warnings: Vec<OutlineWarning>,
}

#[must_use]
pub(crate) fn is_header(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']')
}

pub(crate) fn normalize(input: &str, config: &OutlineConfig) -> Outline {
    let mut outline = Outline::default();
    let mut raw_lines = input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .peekable();

    if let Some(&(line_number, first)) = raw_lines.peek() {
        if is_header(first) {
            outline.header = Some(HeaderLine {
                text: first.to_string(),
                line: line_number,
            });
            raw_lines.next();
        } else if first.starts_with('[') || first.ends_with(']') {
            outline.warnings.push(OutlineWarning::new(
                OutlineWarningCode::MalformedHeader,
                line_number,
                "first line looks like a palette header but its brackets are unbalanced; \
                 treating it as an outline line",
            ));
        }
    }

    for (line_number, raw) in raw_lines {
        if config.is_comment(raw.trim_start()) {
            continue;
        }

        let escaped = if config.escape_syntax {
            escape_syntax(raw)
        } else {
            raw.to_string()
        };
        let expanded = expand_tabs(&escaped, config.tab_width);
        let text = expanded.trim();
        if text.is_empty() {
            continue;
        }

        let leading = leading_spaces(&expanded);
        outline.lines.push(OutlineLine {
            text: text.to_string(),
            depth: config.depth_for(leading),
            line: line_number,
            indented: leading > 0,
        });
    }

    outline
}

/// Rewrites the characters that collide with the DOT description syntax.
#[must_use]
pub(crate) fn escape_syntax(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            ':' => escaped.push(COLON_PLACEHOLDER),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn expand_tabs(line: &str, tab_width: usize) -> String {
    if line.contains('\t') {
        line.replace('\t', &" ".repeat(tab_width))
    } else {
        line.to_string()
    }
}

fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|ch| *ch == ' ').count()
}
