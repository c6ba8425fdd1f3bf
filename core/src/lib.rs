//! Core types for accessibility testable-statement fixtures.
//!
//! This crate defines the data model shared by the wiki parser and the fixture
//! renderer:
//!
//! - [`StatementSection`]: one testable statement as scanned from the wiki
//!   (title, labeled attributes, example code, raw table rows per API).
//! - [`ApiName`]: the closed set of accessibility API families.
//! - [`NormalizedAssertion`]: a canonical `(kind, name, expected)` triple.
//! - [`AssertionRow`]: either a normalized triple or raw passthrough cells.
//! - [`TestFixture`]: the final per-statement record.
//!
//! Validation ([`validate_section`]) decides whether a section is complete
//! enough to become a fixture, and [`fixture_file_name`] derives the output
//! file name from a title.
//!
//! # Example
//!
//! ```
//! use testable_statements_core::*;
//!
//! let mut section = StatementSection::new("Cell role");
//! section.example_code = "<div role=\"cell\" id=\"test\">x</div>\n".into();
//! section
//!     .raw_assertions
//!     .insert(ApiName::Atk, vec![vec!["ROLE_TABLE_CELL".into()]]);
//!
//! assert!(validate_section(&section).is_ok());
//! assert_eq!(fixture_file_name(&section.title), "Cell_role-manual.html");
//! ```

mod naming;
mod types;
mod validate;

pub use naming::{FIXTURE_SUFFIX, fixture_file_name};
pub use types::*;
pub use validate::{SkipReason, validate_section};
