//! Line patterns for the wiki statement format.

use regex::Regex;
use std::sync::LazyLock;

use crate::util::strip_quotes;

/// Regex patterns for recognizing wiki statement lines.
pub(super) static PATTERNS: LazyLock<WikiPatterns> = LazyLock::new(WikiPatterns::new);

pub(super) struct WikiPatterns {
    // `=== Title ===`; exactly three `=` so `==== Label ====` never matches
    pub(super) section_heading: Regex,
    // `==== Label ====`
    pub(super) block_heading: Regex,
    pub(super) spec_url: Regex,
    pub(super) reference: Regex,
    // `|rowspan="N"|text`, quotes optional
    pub(super) row_span: Regex,
}

impl WikiPatterns {
    fn new() -> Self {
        // Constant patterns, exercised by the tests below.
        Self {
            section_heading: Regex::new(r"^===(?:\s+(.*?))?\s*===\s*$")
                .expect("static regex must compile"),
            block_heading: Regex::new(r"^====\s*(.*?)\s*====\s*$")
                .expect("static regex must compile"),
            spec_url: Regex::new(r"^SpecURL:\s*(\S+)").expect("static regex must compile"),
            reference: Regex::new(r"^Reference:\s*(.*?)\s*$").expect("static regex must compile"),
            row_span: Regex::new(r#"^\|\s*rowspan\s*=\s*"?(\d+)"?\s*\|(.*)$"#)
                .expect("static regex must compile"),
        }
    }
}

/// Shape of one line inside a wiki table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TableLine<'a> {
    /// `|-`
    RowSeparator,
    /// `|}`
    TableEnd,
    /// `|rowspan="N"|text`, text trimmed.
    RowSpan { count: usize, text: &'a str },
    /// `|text`, text trimmed and unquoted.
    Cell(&'a str),
    /// Anything else: headers, blank lines, malformed row spans.
    Noise,
}

/// Classifies a table line. Shapes are tried in priority order: row
/// separator, table end, row span, plain cell.
pub(super) fn classify_table_line(line: &str) -> TableLine<'_> {
    let line = line.trim_start();
    if line.starts_with("|-") {
        return TableLine::RowSeparator;
    }
    if line.starts_with("|}") {
        return TableLine::TableEnd;
    }
    if let Some(caps) = PATTERNS.row_span.captures(line) {
        let count = caps.get(1).and_then(|m| m.as_str().parse::<usize>().ok());
        let text = caps.get(2).map_or("", |m| m.as_str()).trim();
        return match count {
            Some(count) => TableLine::RowSpan { count, text },
            None => TableLine::Noise,
        };
    }
    if let Some(rest) = line.strip_prefix('|') {
        let rest = rest.trim();
        if rest.starts_with("rowspan") {
            // row span whose count is not a number
            return TableLine::Noise;
        }
        return TableLine::Cell(strip_quotes(rest));
    }
    TableLine::Noise
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(line: &str) -> Option<String> {
        PATTERNS
            .section_heading
            .captures(line)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()).to_string())
    }

    #[test]
    fn test_section_heading_requires_three_equals() {
        assert_eq!(heading("=== aria-busy ===").as_deref(), Some("aria-busy"));
        assert_eq!(
            heading("=== Test \"Case\"/One = Two ===").as_deref(),
            Some("Test \"Case\"/One = Two")
        );
        assert_eq!(heading("=== ===").as_deref(), Some(""));
        assert_eq!(heading("==== Reference ===="), None);
        assert_eq!(heading("== Overview =="), None);
    }

    #[test]
    fn test_block_heading() {
        let caps = PATTERNS.block_heading.captures("==== Notes ====").unwrap();
        assert_eq!(&caps[1], "Notes");
        assert!(PATTERNS.block_heading.captures("=== Notes ===").is_none());
    }

    #[test]
    fn test_table_line_priority() {
        assert_eq!(classify_table_line("|-"), TableLine::RowSeparator);
        assert_eq!(classify_table_line("|- style=\"x\""), TableLine::RowSeparator);
        assert_eq!(classify_table_line("|}"), TableLine::TableEnd);
        assert_eq!(
            classify_table_line("|rowspan=\"3\"| ATK "),
            TableLine::RowSpan {
                count: 3,
                text: "ATK"
            }
        );
        assert_eq!(
            classify_table_line("|rowspan=2|role"),
            TableLine::RowSpan {
                count: 2,
                text: "role"
            }
        );
        assert_eq!(classify_table_line("| \"cell\" "), TableLine::Cell("cell"));
        assert_eq!(classify_table_line("! API !! Mapping"), TableLine::Noise);
        assert_eq!(classify_table_line(""), TableLine::Noise);
    }

    #[test]
    fn test_non_numeric_rowspan_is_noise() {
        assert_eq!(classify_table_line("|rowspan=\"two\"|role"), TableLine::Noise);
    }
}
