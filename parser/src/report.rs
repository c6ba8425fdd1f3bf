//! Structured reporting for a generation run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use testable_statements_core::SkipReason;

/// A fixture document that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenFixture {
    pub title: String,
    pub file: PathBuf,
    /// Rows across all API groups, placeholder group included.
    pub assertion_count: usize,
}

/// A section that did not become a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSection {
    pub title: String,
    pub reason: SkipReason,
}

/// A fixture that was built but could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFailure {
    pub title: String,
    pub file: PathBuf,
    pub error: String,
}

/// Per-run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
    pub source: String,
    /// RFC 3339 timestamp of the run start.
    pub generated_at: String,
    pub fixtures: Vec<WrittenFixture>,
    pub skipped: Vec<SkippedSection>,
    pub write_failures: Vec<WriteFailure>,
}

impl GenerationReport {
    pub fn new(spec: Option<String>, source: String) -> Self {
        Self {
            spec,
            source,
            generated_at: chrono::Utc::now().to_rfc3339(),
            fixtures: Vec::new(),
            skipped: Vec::new(),
            write_failures: Vec::new(),
        }
    }

    /// Number of statement sections seen.
    pub fn sections_seen(&self) -> usize {
        self.fixtures.len() + self.skipped.len() + self.write_failures.len()
    }

    /// `true` when every built fixture reached disk.
    pub fn is_complete(&self) -> bool {
        self.write_failures.is_empty()
    }
}

impl std::fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} sections: {} written, {} skipped, {} failed",
            self.sections_seen(),
            self.fixtures.len(),
            self.skipped.len(),
            self.write_failures.len()
        )
    }
}
