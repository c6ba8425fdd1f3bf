//! Testable statement parsing and fixture generation.
//!
//! This crate turns the testable statement tables authored on a wiki page
//! into standalone HTML test fixtures. Each `=== heading ===` section of the
//! page describes one statement: some prose, a `<pre>` example, and a table
//! of expected accessibility API mappings grouped by API family.
//!
//! # Main entry points
//!
//! - [`parse_fixtures`]: parse wiki text already in memory into fixtures.
//! - [`generate::generate_fixtures`]: load a source, build every fixture and
//!   write the HTML documents to an output directory.
//! - [`segmenter::Segmenter`]: the line-at-a-time scanner, for callers that
//!   stream their input.
//!
//! # Example
//!
//! ```
//! use testable_statements_parser::{parse_fixtures, segmenter::ParseOptions};
//!
//! let page = "\
//! === role cell ===
//! Reference: cell
//! <pre>
//! <div role=\"row\"><span id=\"test\" role=\"cell\">x</span></div>
//! </pre>
//! {|
//! |-
//! |rowspan=\"1\"|ATK
//! |ROLE_TABLE_CELL
//! |}
//! ";
//!
//! let options = ParseOptions::default().with_spec_url("https://www.w3.org/TR/wai-aria-1.1/");
//! let run = parse_fixtures(page, &options, None);
//! assert_eq!(run.fixtures.len(), 1);
//! assert_eq!(
//!     run.fixtures[0].reference(),
//!     Some("https://www.w3.org/TR/wai-aria-1.1/#cell")
//! );
//! ```
//!
//! # Crate type
//!
//! This is a library crate. The `make-tests` binary lives in the
//! `testable-statements-cli` crate.

pub mod config;
pub mod error;
pub mod fixture;
pub mod generate;
pub mod normalize;
pub mod render;
pub mod report;
pub mod segmenter;
pub mod source;
mod util;

use testable_statements_core::TestFixture;
use tracing::{info, warn};

use fixture::build_fixture;
use report::SkippedSection;
use segmenter::{ParseOptions, sections};

/// Fixtures parsed from one document, plus the sections that were dropped.
#[derive(Debug, Clone, Default)]
pub struct ParseRun {
    pub fixtures: Vec<TestFixture>,
    pub skipped: Vec<SkippedSection>,
}

/// Parses wiki text into fixtures without touching the filesystem.
///
/// Fixtures come back in document order. Incomplete sections are logged and
/// listed in [`ParseRun::skipped`].
pub fn parse_fixtures(text: &str, options: &ParseOptions, code_fragment: Option<&str>) -> ParseRun {
    let mut run = ParseRun::default();
    for section in sections(text.lines(), options.clone()) {
        let title = section.title.clone();
        match build_fixture(section, code_fragment) {
            Ok(fixture) => {
                info!(section = %title, "Parsed statement");
                run.fixtures.push(fixture);
            }
            Err(reason) => {
                warn!(section = %title, %reason, "Skipping section");
                run.skipped.push(SkippedSection { title, reason });
            }
        }
    }
    run
}
