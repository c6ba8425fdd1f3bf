//! Section validation.
//!
//! A scanned [`StatementSection`] only becomes a fixture when it has a title,
//! example code, and at least one assertion row. Anything else is skipped
//! with a [`SkipReason`] and scanning carries on.
//!
//! # Examples
//!
//! ```
//! use testable_statements_core::*;
//!
//! let mut section = StatementSection::new("Cell");
//! section.example_code = "<div role=\"cell\" id=\"test\">x</div>\n".into();
//! assert_eq!(validate_section(&section), Err(SkipReason::NoAssertions));
//!
//! section.raw_assertions.insert(ApiName::Atk, vec![vec!["ROLE_TABLE_CELL".into()]]);
//! assert!(validate_section(&section).is_ok());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::StatementSection;

/// Why a statement section was dropped instead of producing a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Heading had no text.
    #[error("section has no title")]
    EmptyTitle,
    /// No `<pre>` block, or the block was blank.
    #[error("section has no example code")]
    EmptyExampleCode,
    /// No table rows were collected for any API.
    #[error("section has no assertions")]
    NoAssertions,
}

/// Checks that a section is complete enough to become a fixture.
///
/// Checks run in the order title, code, assertions; the first failure wins.
pub fn validate_section(section: &StatementSection) -> Result<(), SkipReason> {
    if section.title.trim().is_empty() {
        return Err(SkipReason::EmptyTitle);
    }
    if section.example_code.trim().is_empty() {
        return Err(SkipReason::EmptyExampleCode);
    }
    if !section.has_assertions() {
        return Err(SkipReason::NoAssertions);
    }
    Ok(())
}
