//! Output formatting for fixtures.
//!
//! [`render_fixture`] produces the standalone HTML test document. The
//! `format_*` functions dump fixture lists for inspection.

use std::collections::BTreeMap;

use serde::Serialize;
use testable_statements_core::{AssertionRow, TestFixture};

use crate::error::Result;

/// Supported dump formats for the `parse` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Test definition handed to `ATTAcomm`.
///
/// Fields are declared in alphabetical order so the serialized keys come out
/// sorted.
#[derive(Debug, Serialize)]
pub struct TestDefinition<'a> {
    pub steps: Vec<TestStep<'a>>,
    pub title: &'a str,
}

/// The single step of a test definition.
#[derive(Debug, Serialize)]
pub struct TestStep<'a> {
    pub element: &'static str,
    pub test: &'a BTreeMap<String, Vec<AssertionRow>>,
    pub title: &'static str,
    #[serde(rename = "type")]
    pub step_type: &'static str,
}

impl<'a> TestDefinition<'a> {
    pub fn for_fixture(fixture: &'a TestFixture) -> Self {
        Self {
            steps: vec![TestStep {
                element: "test",
                test: &fixture.assertions,
                title: "step 1",
                step_type: "test",
            }],
            title: &fixture.title,
        }
    }
}

/// Pretty-printed test definition JSON for `fixture`.
pub fn test_definition_json(fixture: &TestFixture) -> Result<String> {
    let definition = TestDefinition::for_fixture(fixture);
    Ok(serde_json::to_string_pretty(&definition)?)
}

/// Renders the standalone HTML test document for one fixture.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use testable_statements_core::TestFixture;
/// use testable_statements_parser::render::render_fixture;
///
/// let fixture = TestFixture {
///     title: "cell".into(),
///     title_reference: "cell".into(),
///     example_code: "<div id=\"test\" role=\"cell\">x</div>\n".into(),
///     assertions: BTreeMap::new(),
///     attributes: BTreeMap::new(),
/// };
/// let html = render_fixture(&fixture).unwrap();
/// assert!(html.starts_with("<!doctype html>"));
/// assert!(html.contains("new ATTAcomm("));
/// ```
pub fn render_fixture(fixture: &TestFixture) -> Result<String> {
    let definition = test_definition_json(fixture)?;
    let title = &fixture.title;
    let title_reference = &fixture.title_reference;
    let code = &fixture.example_code;

    Ok(format!(
        r#"<!doctype html>
<html>
  <head>
    <title>{title}</title>
    <link rel="stylesheet" href="/resources/testharness.css">
    <link rel="stylesheet" href="/wai-aria/scripts/manual.css">
    <script src="/resources/testharness.js"></script>
    <script src="/resources/testharnessreport.js"></script>
    <script src="/wai-aria/scripts/ATTAcomm.js"></script>
    <script>
    setup({{explicit_timeout: true, explicit_done: true }});

    var theTest = new ATTAcomm(
    {definition}
    ) ;
    </script>
  </head>
  <body>
  <p>This test examines the ARIA properties for {title_reference}.</p>
  {code}
  <div id="manualMode"></div>
  <div id="log"></div>
  <div id="ATTAmessages"></div>
  </body>
</html>
"#
    ))
}

/// Formats a fixture list in the requested dump format.
pub fn format_fixtures(fixtures: &[TestFixture], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(fixtures)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(fixtures)?),
    }
}
