//! ATK assertion normalization.
//!
//! Turns the raw ATK rows of one section into `(kind, name, expected)`
//! triples. Rows are classified by an ordered rule table; the first rule
//! whose predicate accepts the row builds the result. Rows that no rule
//! accepts pass through as raw cells.
//!
//! The output is a fresh list; raw rows are never modified.

use regex::Regex;
use std::sync::LazyLock;

use testable_statements_core::{AssertionRow, Expectation, NormalizedAssertion, RawRow};
use tracing::debug;

use crate::util::strip_quotes;

const NEGATION_PREFIX: &str = "NOT";
const SHOWN: &str = "<shown>";

// SAFETY: These regexes are compile-time constants and are validated by tests.
static INTERFACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s+interface$").expect("static regex must compile"));
static OBJECT_ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^object attribute\s+(.+?)\s*$").expect("static regex must compile")
});

/// A raw row with negation resolved.
///
/// `head` is the cell being classified and `args` the cells after it. A
/// leading `NOT` either prefixes the head in the same cell (`NOT STATE_X`) or
/// stands alone in the first cell, pushing the head one cell right.
#[derive(Debug, Clone, Copy)]
struct RowView<'a> {
    cells: &'a [String],
    head: &'a str,
    args: &'a [String],
    expected: Expectation,
}

impl<'a> RowView<'a> {
    fn new(cells: &'a [String]) -> Option<Self> {
        let first = cells.first()?;

        let negated = first
            .strip_prefix(NEGATION_PREFIX)
            .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace));
        let Some(rest) = negated else {
            return Some(Self {
                cells,
                head: first.as_str(),
                args: &cells[1..],
                expected: Expectation::True,
            });
        };

        let rest = rest.trim_start();
        if rest.is_empty() {
            let head = cells.get(1)?;
            return Some(Self {
                cells,
                head: head.as_str(),
                args: &cells[2..],
                expected: Expectation::False,
            });
        }
        Some(Self {
            cells,
            head: rest,
            args: &cells[1..],
            expected: Expectation::False,
        })
    }

    fn arg(&self, index: usize) -> &'a str {
        self.args.get(index).map_or("", String::as_str)
    }
}

/// One classification rule: `matches` decides, `build` produces the entry.
struct NormalizeRule {
    name: &'static str,
    matches: fn(&RowView<'_>) -> bool,
    build: fn(&RowView<'_>) -> AssertionRow,
}

/// Rules in priority order. First match wins.
const RULES: &[NormalizeRule] = &[
    NormalizeRule {
        name: "role",
        matches: |row| row.head.starts_with("ROLE_"),
        build: |row| NormalizedAssertion::role(row.head, row.expected).into(),
    },
    NormalizeRule {
        name: "interface",
        matches: |row| INTERFACE_RE.is_match(row.head),
        build: build_interface,
    },
    NormalizeRule {
        name: "object-or-attribute",
        matches: |row| row.head == "object" || row.head == "attribute",
        build: build_attribute_value,
    },
    NormalizeRule {
        name: "state",
        matches: |row| row.head.starts_with("STATE_"),
        build: |row| NormalizedAssertion::state(row.head, row.expected).into(),
    },
    NormalizeRule {
        name: "object-attribute",
        matches: |row| OBJECT_ATTRIBUTE_RE.is_match(row.head),
        build: build_object_attribute,
    },
];

// Interface presence is decided by the value cell alone; a NOT prefix has
// no effect here.
fn build_interface(row: &RowView<'_>) -> AssertionRow {
    let name = INTERFACE_RE
        .captures(row.head)
        .and_then(|caps| caps.get(1))
        .map_or(row.head, |m| m.as_str());
    let value = row.arg(0);
    let shown = value == SHOWN || value.eq_ignore_ascii_case("true");
    NormalizedAssertion::interface(name, Expectation::from(shown)).into()
}

// `object | <name> | <value> | <exposed?>`
fn build_attribute_value(row: &RowView<'_>) -> AssertionRow {
    let name = format!("{}:{}", row.arg(0), strip_quotes(row.arg(1)));
    let exposed = !matches!(row.arg(2), "not exposed" | "false");
    NormalizedAssertion::attribute(name, Expectation::from(exposed)).into()
}

// `object attribute <name> | <value>`
fn build_object_attribute(row: &RowView<'_>) -> AssertionRow {
    let attribute = OBJECT_ATTRIBUTE_RE
        .captures(row.head)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str());
    let value = strip_quotes(row.arg(0));
    if matches!(value, "not exposed" | "not mapped") {
        NormalizedAssertion::attribute(attribute, Expectation::False).into()
    } else {
        NormalizedAssertion::attribute(format!("{attribute}:{value}"), Expectation::True).into()
    }
}

// Unrecognized shape: keep the cells, but read `<shown>` in the third
// column as `true`.
fn passthrough(cells: &[String]) -> AssertionRow {
    let mut cells = cells.to_vec();
    if cells.get(2).is_some_and(|third| third == SHOWN) {
        cells[2] = Expectation::True.as_str().to_string();
    }
    AssertionRow::Raw(cells)
}

/// Normalizes a single raw ATK row.
///
/// # Examples
///
/// ```
/// use testable_statements_core::{AssertionRow, Expectation, NormalizedAssertion};
/// use testable_statements_parser::normalize::normalize_atk_row;
///
/// let row = vec!["NOT ROLE_TABLE_CELL".to_string()];
/// assert_eq!(
///     normalize_atk_row(&row),
///     AssertionRow::Normalized(NormalizedAssertion::role("ROLE_TABLE_CELL", Expectation::False))
/// );
/// ```
pub fn normalize_atk_row(cells: &[String]) -> AssertionRow {
    let Some(view) = RowView::new(cells) else {
        return passthrough(cells);
    };
    match RULES.iter().find(|rule| (rule.matches)(&view)) {
        Some(rule) => {
            debug!(rule = rule.name, head = view.head, "Normalized ATK row");
            (rule.build)(&view)
        }
        None => {
            debug!(cells = ?view.cells, "No rule matched ATK row; passing through");
            passthrough(cells)
        }
    }
}

/// Normalizes every raw ATK row, preserving order and length.
pub fn normalize_atk_rows(rows: &[RawRow]) -> Vec<AssertionRow> {
    rows.iter().map(|row| normalize_atk_row(row)).collect()
}
