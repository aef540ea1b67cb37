//! Text normalization shared by the extraction strategies.

/// Characters stripped from both ends of extracted text.
///
/// Unicode whitespace plus the byte order mark, which decoders keep as a
/// leading `U+FEFF`.
fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Trim surrounding whitespace and byte order marks.
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(is_trimmable)
}

/// Length used for threshold comparisons, in Unicode scalar values.
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

/// Decode bytes as UTF-8, replacing invalid sequences with `U+FFFD`, and trim.
pub fn decode_lossy_trimmed(bytes: &[u8]) -> String {
    trim_text(&String::from_utf8_lossy(bytes)).to_string()
}
