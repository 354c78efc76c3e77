/// Splits `"<color> <name>"` at the first space.
///
/// A line without a space is all color and an empty name.
#[must_use]
pub(crate) fn split_color_tag(text: &str) -> (&str, &str) {
    match text.split_once(' ') {
        Some((color, name)) => (color, name.trim()),
        None => (text, ""),
    }
}

/// Root lines may omit the color; a single token is the root's name.
#[must_use]
pub(crate) fn split_root(text: &str) -> (&str, &str) {
    if text.contains(' ') {
        split_color_tag(text)
    } else {
        ("", text)
    }
}
