//! Fixture generation pipeline.
//!
//! Loads the wiki text, streams it through the segmenter, builds one fixture
//! per complete section and writes each as an HTML document into the output
//! directory. Only configuration and source errors abort a run; skipped
//! sections and failed writes are logged and land in the
//! [`GenerationReport`].

use std::path::{Path, PathBuf};

use testable_statements_core::{TestFixture, fixture_file_name};
use tracing::{info, warn};

use crate::config::KnownSpec;
use crate::error::{GenerationError, Result};
use crate::fixture::build_fixture;
use crate::render::render_fixture;
use crate::report::{GenerationReport, SkippedSection, WriteFailure, WrittenFixture};
use crate::segmenter::{ParseOptions, sections};
use crate::source::DocumentSource;

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub source: DocumentSource,
    pub output_dir: PathBuf,
    /// Known spec name, recorded in the report.
    pub spec_name: Option<String>,
    pub parse: ParseOptions,
    /// Template wrapping each example; see [`crate::fixture::CODE_PLACEHOLDER`].
    pub code_fragment: Option<String>,
}

impl GenerateConfig {
    pub fn new(source: DocumentSource, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
            spec_name: None,
            parse: ParseOptions::default(),
            code_fragment: None,
        }
    }

    /// Configuration for a known spec fetched from `wiki_api`.
    pub fn for_spec(spec: &KnownSpec, wiki_api: &str, output_dir: impl Into<PathBuf>) -> Self {
        let source = DocumentSource::Wiki {
            api_url: wiki_api.to_string(),
            page: spec.title.clone(),
        };
        Self {
            spec_name: Some(spec.name.clone()),
            parse: ParseOptions::default().with_spec_url(&spec.spec_url),
            code_fragment: spec.fragment.clone(),
            ..Self::new(source, output_dir)
        }
    }
}

/// Runs the whole pipeline.
///
/// # Errors
///
/// Fails before reading any input if the output directory does not exist,
/// and fails if the source cannot be loaded. Per-section problems never
/// fail the run.
pub fn generate_fixtures(config: &GenerateConfig) -> Result<GenerationReport> {
    if !config.output_dir.is_dir() {
        return Err(GenerationError::MissingOutputDir(config.output_dir.clone()));
    }

    let text = config.source.load()?;
    let mut report = GenerationReport::new(config.spec_name.clone(), config.source.describe());
    info!(source = %report.source, "Generating fixtures");

    for section in sections(text.lines(), config.parse.clone()) {
        let title = section.title.clone();
        let fixture = match build_fixture(section, config.code_fragment.as_deref()) {
            Ok(fixture) => fixture,
            Err(reason) => {
                warn!(section = %title, %reason, "Skipping section");
                report.skipped.push(SkippedSection { title, reason });
                continue;
            }
        };

        match write_fixture(&config.output_dir, &fixture) {
            Ok(file) => {
                let assertion_count = fixture.assertions.values().map(Vec::len).sum();
                info!(section = %title, file = %file.display(), "Wrote fixture");
                report.fixtures.push(WrittenFixture {
                    title,
                    file,
                    assertion_count,
                });
            }
            Err(err) => {
                let file = config.output_dir.join(fixture_file_name(&title));
                warn!(section = %title, error = %err, "Failed to write fixture");
                report.write_failures.push(WriteFailure {
                    title,
                    file,
                    error: err.to_string(),
                });
            }
        }
    }

    info!(summary = %report, "Generation finished");
    Ok(report)
}

/// Renders `fixture` and writes it under `output_dir`. Returns the path.
pub fn write_fixture(output_dir: &Path, fixture: &TestFixture) -> Result<PathBuf> {
    let path = output_dir.join(fixture_file_name(&fixture.title));
    let html = render_fixture(fixture)?;
    std::fs::write(&path, html)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpecRegistry;

    #[test]
    fn test_missing_output_dir_fails_before_loading() {
        // The source does not exist either; the directory check must win.
        let config = GenerateConfig::new(
            DocumentSource::File(PathBuf::from("/nonexistent/page.wiki")),
            "/nonexistent/out",
        );
        let err = generate_fixtures(&config).unwrap_err();
        assert!(matches!(err, GenerationError::MissingOutputDir(_)));
    }

    #[test]
    fn test_for_spec_carries_url_and_fragment() {
        let registry = SpecRegistry::builtin();
        let svg = registry.find("svg").unwrap();
        let config = GenerateConfig::for_spec(svg, registry.wiki_api(), "out");
        assert_eq!(config.spec_name.as_deref(), Some("svg"));
        assert_eq!(
            config.parse.spec_url.as_deref(),
            Some("https://www.w3.org/TR/svg-aam-1.0/")
        );
        assert!(config.code_fragment.as_deref().unwrap().contains("%code%"));
        assert_eq!(
            config.source,
            DocumentSource::Wiki {
                api_url: "https://www.w3.org/wiki/api.php".into(),
                page: "SVG_Accessibility/Testing/Test_Assertions_with_Tables_for_ATTA".into(),
            }
        );
    }

    #[test]
    fn test_write_fixture_uses_derived_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = TestFixture {
            title: "aria-sort \"none\"".into(),
            title_reference: "aria-sort \"none\"".into(),
            example_code: "<div id=\"test\"></div>\n".into(),
            assertions: Default::default(),
            attributes: Default::default(),
        };
        let path = write_fixture(dir.path(), &fixture).unwrap();
        assert_eq!(path, dir.path().join("aria-sort_none-manual.html"));
        assert!(std::fs::read_to_string(path).unwrap().contains("<title>aria-sort \"none\"</title>"));
    }
}
