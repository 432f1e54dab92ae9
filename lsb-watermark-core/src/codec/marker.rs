/// In-band terminator appended to every payload before bit conversion.
pub const END_MARKER: &str = "[END]";

/// Append the end marker to `text`.
pub fn with_marker(text: &str) -> String {
    let mut framed = String::with_capacity(text.len() + END_MARKER.len());
    framed.push_str(text);
    framed.push_str(END_MARKER);
    framed
}

/// Text before the first end marker, or `None` when no marker is present.
pub fn strip_marker(text: &str) -> Option<&str> {
    text.find(END_MARKER).map(|index| &text[..index])
}

/// Text before a marker that closes `text`, if `text` ends with one.
pub(crate) fn strip_trailing_marker(text: &str) -> Option<&str> {
    text.strip_suffix(END_MARKER)
}
