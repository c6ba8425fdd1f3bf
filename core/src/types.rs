//! Statement and fixture type definitions.
//!
//! This module defines the data model shared by the parser and the renderer:
//! raw statement sections as they come off the wiki table, normalized
//! assertions, and the final fixture record. Serialized string values (API
//! names, assertion kinds, `"true"`/`"false"` expectations) are exactly the
//! ones the downstream test harness expects.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Label of the synthetic API group added to every fixture.
///
/// The harness uses it to self-test its own plumbing, independent of the
/// statement content.
pub const PLACEHOLDER_API: &str = "WAIFAKE";

/// A raw table row: cells in column order.
pub type RawRow = Vec<String>;

/// Accessibility API family a table block belongs to.
///
/// The set is closed. Any row-span label that is not one of these names is a
/// row type, not an API.
///
/// # Examples
///
/// ```
/// use testable_statements_core::ApiName;
///
/// assert_eq!(ApiName::from_marker("ATK"), Some(ApiName::Atk));
/// assert_eq!(ApiName::from_marker("role"), None);
/// assert_eq!(ApiName::IAccessible2.as_str(), "IAccessible2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ApiName {
    #[serde(rename = "UIA")]
    Uia,
    #[serde(rename = "MSAA")]
    Msaa,
    #[serde(rename = "ATK")]
    Atk,
    #[serde(rename = "IAccessible2")]
    IAccessible2,
    #[serde(rename = "AXAPI")]
    Axapi,
}

impl ApiName {
    /// Every known API family, in declaration order.
    pub const ALL: [ApiName; 5] = [
        ApiName::Uia,
        ApiName::Msaa,
        ApiName::Atk,
        ApiName::IAccessible2,
        ApiName::Axapi,
    ];

    /// Returns the exact marker string used in wiki tables and test output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uia => "UIA",
            Self::Msaa => "MSAA",
            Self::Atk => "ATK",
            Self::IAccessible2 => "IAccessible2",
            Self::Axapi => "AXAPI",
        }
    }

    /// Matches a row-span label against the API names. Case-sensitive, exact.
    pub fn from_marker(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|api| api.as_str() == text)
    }
}

impl fmt::Display for ApiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a normalized assertion checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssertionKind {
    Role,
    State,
    Interface,
    Attribute,
}

impl AssertionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::State => "state",
            Self::Interface => "interface",
            Self::Attribute => "attribute",
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected outcome of an assertion, serialized as the strings `"true"` and
/// `"false"`.
///
/// # Examples
///
/// ```
/// use testable_statements_core::Expectation;
///
/// assert_eq!(Expectation::from(false), Expectation::False);
/// assert_eq!(serde_json::to_string(&Expectation::True).unwrap(), "\"true\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Expectation {
    #[default]
    #[serde(rename = "true")]
    True,
    #[serde(rename = "false")]
    False,
}

impl Expectation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
        }
    }
}

impl From<bool> for Expectation {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type AssertionTriple = (AssertionKind, String, Expectation);

/// Canonical `(kind, name, expected)` assertion.
///
/// Serializes as a three-element array, e.g. `["role","ROLE_TABLE_CELL","true"]`.
/// For [`AssertionKind::Attribute`] the name is either a bare attribute name
/// (asserting non-exposure) or `name:value`.
///
/// # Examples
///
/// ```
/// use testable_statements_core::{Expectation, NormalizedAssertion};
///
/// let assertion = NormalizedAssertion::attribute("xml-roles:cell", Expectation::True);
/// let json = serde_json::to_string(&assertion).unwrap();
/// assert_eq!(json, r#"["attribute","xml-roles:cell","true"]"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AssertionTriple", from = "AssertionTriple")]
pub struct NormalizedAssertion {
    pub kind: AssertionKind,
    pub name: String,
    pub expected: Expectation,
}

impl NormalizedAssertion {
    pub fn new(kind: AssertionKind, name: impl Into<String>, expected: Expectation) -> Self {
        Self {
            kind,
            name: name.into(),
            expected,
        }
    }

    pub fn role(name: impl Into<String>, expected: Expectation) -> Self {
        Self::new(AssertionKind::Role, name, expected)
    }

    pub fn state(name: impl Into<String>, expected: Expectation) -> Self {
        Self::new(AssertionKind::State, name, expected)
    }

    pub fn interface(name: impl Into<String>, expected: Expectation) -> Self {
        Self::new(AssertionKind::Interface, name, expected)
    }

    pub fn attribute(name: impl Into<String>, expected: Expectation) -> Self {
        Self::new(AssertionKind::Attribute, name, expected)
    }
}

impl From<NormalizedAssertion> for AssertionTriple {
    fn from(assertion: NormalizedAssertion) -> Self {
        (assertion.kind, assertion.name, assertion.expected)
    }
}

impl From<AssertionTriple> for NormalizedAssertion {
    fn from((kind, name, expected): AssertionTriple) -> Self {
        Self {
            kind,
            name,
            expected,
        }
    }
}

/// One entry of a fixture's assertion list.
///
/// ATK rows are normalized. Every other API family, and ATK rows no rule
/// recognizes, are carried as raw cells for the harness to interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssertionRow {
    Normalized(NormalizedAssertion),
    Raw(RawRow),
}

impl AssertionRow {
    pub fn as_normalized(&self) -> Option<&NormalizedAssertion> {
        match self {
            Self::Normalized(assertion) => Some(assertion),
            Self::Raw(_) => None,
        }
    }
}

impl From<NormalizedAssertion> for AssertionRow {
    fn from(assertion: NormalizedAssertion) -> Self {
        Self::Normalized(assertion)
    }
}

/// Rows of the synthetic [`PLACEHOLDER_API`] group.
pub fn placeholder_rows() -> Vec<AssertionRow> {
    [
        ["property", "role", "is", "ROLE_TABLE_CELL"],
        ["property", "interfaces", "contains", "TableCell"],
    ]
    .into_iter()
    .map(|cells| AssertionRow::Raw(cells.iter().map(|c| c.to_string()).collect()))
    .collect()
}

/// One testable statement as scanned from the wiki document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSection {
    /// Heading text, used as display title and file name source.
    pub title: String,
    /// Labeled free-text blocks, keyed by lower-cased label.
    pub attributes: BTreeMap<String, String>,
    /// Markup between `<pre>` and `</pre>`.
    pub example_code: String,
    /// Raw table rows grouped by API family.
    pub raw_assertions: BTreeMap<ApiName, Vec<RawRow>>,
}

impl StatementSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// Returns `true` if any API group holds at least one row.
    pub fn has_assertions(&self) -> bool {
        self.raw_assertions.values().any(|rows| !rows.is_empty())
    }

    pub fn rows_for(&self, api: ApiName) -> &[RawRow] {
        self.raw_assertions
            .get(&api)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Final per-statement record handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFixture {
    pub title: String,
    /// Title, wrapped in an anchor when the section carried a reference.
    pub title_reference: String,
    pub example_code: String,
    /// Assertion lists keyed by API group label, including [`PLACEHOLDER_API`].
    pub assertions: BTreeMap<String, Vec<AssertionRow>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl TestFixture {
    pub fn assertions_for(&self, api: ApiName) -> Option<&[AssertionRow]> {
        self.assertions.get(api.as_str()).map(Vec::as_slice)
    }

    /// Value of the `reference` attribute, if the section had one.
    pub fn reference(&self) -> Option<&str> {
        self.attributes.get("reference").map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_marker_is_exact() {
        assert_eq!(ApiName::from_marker("AXAPI"), Some(ApiName::Axapi));
        assert_eq!(ApiName::from_marker("atk"), None);
        assert_eq!(ApiName::from_marker(" ATK"), None);
    }

    #[test]
    fn test_api_serializes_to_marker() {
        let json = serde_json::to_string(&ApiName::IAccessible2).unwrap();
        assert_eq!(json, "\"IAccessible2\"");
        let back: ApiName = serde_json::from_str("\"MSAA\"").unwrap();
        assert_eq!(back, ApiName::Msaa);
    }

    #[test]
    fn test_assertion_row_untagged_serialization() {
        let rows = vec![
            AssertionRow::from(NormalizedAssertion::role("ROLE_CELL", Expectation::False)),
            AssertionRow::Raw(vec!["property".into(), "role".into()]),
        ];
        let json = serde_json::to_string(&rows).unwrap();
        assert_eq!(json, r#"[["role","ROLE_CELL","false"],["property","role"]]"#);
    }

    #[test]
    fn test_raw_row_with_unknown_kind_deserializes_as_raw() {
        let row: AssertionRow = serde_json::from_str(r#"["widget","x","true"]"#).unwrap();
        assert!(row.as_normalized().is_none());
        let row: AssertionRow = serde_json::from_str(r#"["state","STATE_BUSY","true"]"#).unwrap();
        assert_eq!(
            row.as_normalized(),
            Some(&NormalizedAssertion::state("STATE_BUSY", Expectation::True))
        );
    }

    #[test]
    fn test_section_has_assertions_ignores_empty_groups() {
        let mut section = StatementSection::new("Cell");
        section.raw_assertions.insert(ApiName::Atk, Vec::new());
        assert!(!section.has_assertions());
        section
            .raw_assertions
            .insert(ApiName::Uia, vec![vec!["ControlType".into(), "DataItem".into()]]);
        assert!(section.has_assertions());
        assert_eq!(section.rows_for(ApiName::Uia).len(), 1);
        assert!(section.rows_for(ApiName::Axapi).is_empty());
    }

    #[test]
    fn test_placeholder_rows() {
        let rows = placeholder_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            AssertionRow::Raw(vec![
                "property".into(),
                "interfaces".into(),
                "contains".into(),
                "TableCell".into()
            ])
        );
    }
}
