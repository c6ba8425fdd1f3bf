//! Small text helpers shared by the segmenter and the normalizer.

/// Removes one matching pair of surrounding single or double quotes.
///
/// Unbalanced quotes are left alone.
pub fn strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && matches!(first, b'"' | b'\'') {
            return &text[1..text.len() - 1];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_one_layer() {
        assert_eq!(strip_quotes("\"cell\""), "cell");
        assert_eq!(strip_quotes("'cell'"), "cell");
        assert_eq!(strip_quotes("\"'cell'\""), "'cell'");
    }

    #[test]
    fn test_leaves_unbalanced_and_short_text() {
        assert_eq!(strip_quotes("\"cell'"), "\"cell'");
        assert_eq!(strip_quotes("\""), "\"");
        assert_eq!(strip_quotes(""), "");
        assert_eq!(strip_quotes("not exposed"), "not exposed");
    }
}
