use cg_core::{OutlineError, Palette};

/// Parses a `[name:value, ...]` header into a palette.
///
/// Blank fields are skipped so a trailing comma is harmless. Each field is
/// split at its first `:`; a field without one is an error. A name declared
/// twice keeps the later value.
pub(crate) fn parse_palette(header: &str, line: usize) -> Result<Palette, OutlineError> {
    let inner = header
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(header);

    let mut palette = Palette::new();
    for field in inner.split(',').map(str::trim) {
        if field.is_empty() {
            continue;
        }
        let Some((name, value)) = field.split_once(':') else {
            return Err(OutlineError::MalformedPaletteField {
                field: field.to_string(),
                line,
            });
        };
        palette.insert(name.trim(), value.trim());
    }

    Ok(palette)
}

#[cfg(test)]
mod tests {
    use cg_core::OutlineError;

    use super::parse_palette;

    #[test]
    fn parses_name_value_pairs() {
        let palette = parse_palette("[warn:orange, ok:#00aa00]", 1).expect("palette");
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.get("warn"), Some("orange"));
        assert_eq!(palette.get("ok"), Some("#00aa00"));
    }

    #[test]
    fn trims_around_separators() {
        let palette = parse_palette("[ warn : orange ,ok:green ]", 1).expect("palette");
        assert_eq!(palette.get("warn"), Some("orange"));
        assert_eq!(palette.get("ok"), Some("green"));
    }

    #[test]
    fn empty_header_yields_empty_palette() {
        assert!(parse_palette("[]", 1).expect("palette").is_empty());
        assert!(parse_palette("[ , ]", 1).expect("palette").is_empty());
    }

    #[test]
    fn field_without_separator_is_fatal() {
        let error = parse_palette("[warn:orange, broken]", 3).expect_err("missing separator");
        assert_eq!(
            error,
            OutlineError::MalformedPaletteField {
                field: "broken".to_string(),
                line: 3,
            }
        );
    }

    #[test]
    fn value_keeps_colons_after_the_first() {
        let palette = parse_palette("[odd:a:b]", 1).expect("palette");
        assert_eq!(palette.get("odd"), Some("a:b"));
    }

    #[test]
    fn later_declaration_wins() {
        let palette = parse_palette("[c:red, c:blue]", 1).expect("palette");
        assert_eq!(palette.get("c"), Some("blue"));
    }
}
