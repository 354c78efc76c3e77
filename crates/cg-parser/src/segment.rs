use crate::normalize::OutlineLine;

/// Splits the body into root-led blocks.
///
/// Every unindented line opens a new block; indented lines join the block that
/// is currently open. An indented first line opens the first block itself.
pub(crate) fn split_subgraphs(lines: &[OutlineLine]) -> Vec<&[OutlineLine]> {
    let mut blocks = Vec::new();
    let mut start = 0;

    for (index, line) in lines.iter().enumerate().skip(1) {
        if !line.indented {
            blocks.push(&lines[start..index]);
            start = index;
        }
    }
    if start < lines.len() {
        blocks.push(&lines[start..]);
    }

    blocks
}

#[cfg(test)]
mod tests {
    use cg_core::OutlineConfig;

    use super::split_subgraphs;
    use crate::normalize::normalize;

    fn block_sizes(input: &str) -> Vec<usize> {
        let outline = normalize(input, &OutlineConfig::default());
        split_subgraphs(&outline.lines)
            .into_iter()
            .map(<[_]>::len)
            .collect()
    }

    #[test]
    fn empty_body_has_no_blocks() {
        assert!(block_sizes("").is_empty());
        assert!(block_sizes("[a:red]\n# only a comment\n").is_empty());
    }

    #[test]
    fn single_root_is_one_block() {
        assert_eq!(block_sizes("root\n    red A\n        red B\n"), vec![3]);
    }

    #[test]
    fn each_unindented_line_opens_a_block() {
        let input = "first\n    red A\nsecond\n    blue B\n    blue C\nthird\n";
        assert_eq!(block_sizes(input), vec![2, 3, 1]);
    }

    #[test]
    fn blank_lines_and_comments_between_roots_do_not_split() {
        let input = "first\n    red A\n\n# section\n    red B\nsecond\n    blue C";
        assert_eq!(block_sizes(input), vec![3, 2]);
    }

    #[test]
    fn indented_first_line_opens_the_first_block() {
        assert_eq!(block_sizes("    red A\n    red B\nroot\n"), vec![2, 1]);
    }

    #[test]
    fn flat_body_is_one_block_per_line() {
        assert_eq!(block_sizes("a\nb\nc"), vec![1, 1, 1]);
    }

    #[test]
    fn shallow_indentation_stays_in_the_block() {
        assert_eq!(block_sizes("root\n  red A\n    red B"), vec![3]);
    }
}
