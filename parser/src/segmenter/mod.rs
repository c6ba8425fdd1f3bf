//! Wiki statement segmenter.
//!
//! Scans a wiki page line by line and cuts it into [`StatementSection`]s. Each
//! section starts at a `=== Title ===` heading and carries:
//!
//! - labeled `==== Block ====` text and a composed `reference` URL,
//! - the example markup between `<pre>` and `</pre>`,
//! - the rows of the `{| ... |}` table that follows, grouped by API family.
//!
//! # Architecture
//!
//! [`Segmenter`] owns every accumulator (scan state, open section, table row
//! cursor, active API, pending row type). Lines go in through
//! [`Segmenter::feed_line`]; a finished section comes out whenever the next
//! heading arrives, and [`Segmenter::finish`] flushes the last one. The scan
//! is strictly forward: no line is looked at twice.
//!
//! [`sections`] wraps the same machine as a lazy iterator over any line
//! source.

mod patterns;
mod table;

use std::collections::BTreeMap;

use testable_statements_core::{ApiName, StatementSection};
use tracing::{debug, trace};

use patterns::{PATTERNS, TableLine, classify_table_line};
use table::TableBuilder;

/// Marker phrase of caption lines inside example code blocks.
const CAPTION_MARKER: &str = "if given";

/// Knobs for one scan.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Base URL that `Reference: <fragment>` lines are resolved against.
    /// A `SpecURL:` line in the document overrides it.
    pub spec_url: Option<String>,
    /// Drop whitespace-led code lines containing "if given". Older pages
    /// were written without this convention; turn it off for those.
    pub skip_if_given_captions: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            spec_url: None,
            skip_if_given_captions: true,
        }
    }
}

impl ParseOptions {
    pub fn with_spec_url(mut self, url: &str) -> Self {
        self.spec_url = Some(url.to_string());
        self
    }
}

/// Where the scanner is within the current section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// No section open.
    #[default]
    Between,
    /// Prose and labeled blocks before the example.
    Header,
    /// Inside `<pre>`.
    Code,
    /// After `</pre>`, looking for `{|`.
    TableSeek,
    /// Inside the table.
    Table,
    /// Table closed; rest of the section is ignored.
    Done,
}

/// Accumulators for the section currently being scanned.
#[derive(Debug)]
struct SectionBuilder {
    title: String,
    attributes: BTreeMap<String, String>,
    example_code: String,
    block: Option<String>,
    table: TableBuilder,
}

impl SectionBuilder {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            attributes: BTreeMap::new(),
            example_code: String::new(),
            block: None,
            table: TableBuilder::default(),
        }
    }

    fn build(self) -> StatementSection {
        StatementSection {
            title: self.title,
            attributes: self.attributes,
            example_code: self.example_code,
            raw_assertions: self.table.finish(),
        }
    }
}

/// Single-pass state machine over wiki statement markup.
///
/// # Examples
///
/// ```
/// use testable_statements_parser::segmenter::{ParseOptions, Segmenter};
///
/// let mut segmenter = Segmenter::new(ParseOptions::default());
/// let page = "=== Cell ===\n<pre>\n<div id=\"test\" role=\"cell\"></div>\n</pre>\n{|\n|rowspan=\"1\"|ATK\n|ROLE_TABLE_CELL\n|}\n";
///
/// let mut sections = Vec::new();
/// for line in page.lines() {
///     sections.extend(segmenter.feed_line(line));
/// }
/// sections.extend(segmenter.finish());
///
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].title, "Cell");
/// ```
#[derive(Debug)]
pub struct Segmenter {
    options: ParseOptions,
    spec_url: Option<String>,
    state: ScanState,
    current: Option<SectionBuilder>,
    line_number: usize,
}

impl Segmenter {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            spec_url: options.spec_url.clone(),
            options,
            state: ScanState::Between,
            current: None,
            line_number: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Base URL currently used for `Reference:` lines.
    pub fn spec_url(&self) -> Option<&str> {
        self.spec_url.as_deref()
    }

    /// Consumes one line. Returns the previous section when this line opens
    /// a new one.
    pub fn feed_line(&mut self, line: &str) -> Option<StatementSection> {
        self.line_number += 1;
        let line = line.trim_end_matches(['\r', '\n']);

        if let Some(caps) = PATTERNS.section_heading.captures(line) {
            let title = caps.get(1).map_or("", |m| m.as_str()).trim();
            let finished = self.finish();
            debug!(line = self.line_number, title, "Opened statement section");
            self.current = Some(SectionBuilder::new(title));
            self.state = ScanState::Header;
            return finished;
        }

        match self.state {
            ScanState::Between => {
                self.apply_spec_url(line);
            }
            ScanState::Header => self.scan_header(line),
            ScanState::Code => self.scan_code(line),
            ScanState::TableSeek => {
                if line.trim_start().starts_with("{|") {
                    self.state = ScanState::Table;
                }
            }
            ScanState::Table => self.scan_table(line),
            ScanState::Done => {}
        }
        None
    }

    /// Closes the open section, if any, and returns it.
    pub fn finish(&mut self) -> Option<StatementSection> {
        self.state = ScanState::Between;
        self.current.take().map(SectionBuilder::build)
    }

    fn apply_spec_url(&mut self, line: &str) -> bool {
        let Some(caps) = PATTERNS.spec_url.captures(line) else {
            return false;
        };
        let url = caps[1].to_string();
        debug!(url = %url, "Spec URL overridden by document");
        self.spec_url = Some(url);
        true
    }

    fn scan_header(&mut self, line: &str) {
        if self.apply_spec_url(line) {
            return;
        }
        let reference = PATTERNS
            .reference
            .captures(line)
            .map(|caps| self.compose_reference(&caps[1]));
        let Some(section) = self.current.as_mut() else {
            return;
        };

        if let Some(caps) = PATTERNS.block_heading.captures(line) {
            section.block = Some(caps[1].to_lowercase());
            return;
        }
        if let Some(reference) = reference {
            section.attributes.insert("reference".to_string(), reference);
            return;
        }
        if line.contains("<pre>") {
            self.state = ScanState::Code;
            return;
        }
        if let Some(block) = &section.block {
            let value = section.attributes.entry(block.clone()).or_default();
            value.push_str(line);
            value.push('\n');
        }
    }

    fn scan_code(&mut self, line: &str) {
        if line.contains("</pre>") {
            self.state = ScanState::TableSeek;
            return;
        }
        if self.options.skip_if_given_captions
            && line.starts_with(char::is_whitespace)
            && line.contains(CAPTION_MARKER)
        {
            trace!(line = self.line_number, "Skipped caption line in example code");
            return;
        }
        if let Some(section) = self.current.as_mut() {
            section.example_code.push_str(line);
            section.example_code.push('\n');
        }
    }

    fn scan_table(&mut self, line: &str) {
        let Some(section) = self.current.as_mut() else {
            return;
        };
        match classify_table_line(line) {
            TableLine::RowSeparator => section.table.end_row(),
            TableLine::TableEnd => self.state = ScanState::Done,
            TableLine::RowSpan { count, text } => match ApiName::from_marker(text) {
                Some(api) => section.table.start_api(api),
                None => section.table.start_row_type(text, count),
            },
            TableLine::Cell(text) => section.table.push_cell(text),
            TableLine::Noise => {}
        }
    }

    fn compose_reference(&self, fragment: &str) -> String {
        match self.spec_url.as_deref() {
            Some(base) => format!("{base}#{fragment}"),
            None => format!("#{fragment}"),
        }
    }
}

/// Lazy iterator of sections over a line source.
pub struct Sections<I> {
    lines: I,
    segmenter: Segmenter,
    exhausted: bool,
}

impl<I, S> Iterator for Sections<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = StatementSection;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        for line in self.lines.by_ref() {
            if let Some(section) = self.segmenter.feed_line(line.as_ref()) {
                return Some(section);
            }
        }
        self.exhausted = true;
        self.segmenter.finish()
    }
}

/// Segments any line source into sections, in document order.
pub fn sections<I>(lines: I, options: ParseOptions) -> Sections<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Sections {
        lines: lines.into_iter(),
        segmenter: Segmenter::new(options),
        exhausted: false,
    }
}

/// Segments a whole document held in memory.
pub fn segment_document(text: &str, options: ParseOptions) -> Vec<StatementSection> {
    sections(text.lines(), options).collect()
}
