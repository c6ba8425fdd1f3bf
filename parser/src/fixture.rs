//! Fixture assembly from scanned sections.

use std::collections::BTreeMap;

use testable_statements_core::{
    ApiName, AssertionRow, PLACEHOLDER_API, SkipReason, StatementSection, TestFixture,
    placeholder_rows, validate_section,
};

use crate::normalize::normalize_atk_rows;

/// Placeholder in a code fragment template that receives the example code.
pub const CODE_PLACEHOLDER: &str = "%code%";

/// Builds the fixture for one section, or says why the section is skipped.
///
/// ATK rows are normalized; other API rows are carried raw. The
/// [`PLACEHOLDER_API`] group is always added. When `code_fragment` is given,
/// the example code is spliced into it at [`CODE_PLACEHOLDER`].
///
/// # Examples
///
/// ```
/// use testable_statements_core::{ApiName, StatementSection};
/// use testable_statements_parser::fixture::build_fixture;
///
/// let mut section = StatementSection::new("Cell");
/// section.example_code = "<div id=\"test\" role=\"cell\"></div>\n".into();
/// section.raw_assertions.insert(ApiName::Atk, vec![vec!["ROLE_TABLE_CELL".into()]]);
///
/// let fixture = build_fixture(section, None).unwrap();
/// assert_eq!(fixture.assertions_for(ApiName::Atk).unwrap().len(), 1);
/// assert!(fixture.assertions.contains_key("WAIFAKE"));
/// ```
pub fn build_fixture(
    section: StatementSection,
    code_fragment: Option<&str>,
) -> Result<TestFixture, SkipReason> {
    validate_section(&section)?;

    let StatementSection {
        title,
        attributes,
        example_code,
        raw_assertions,
    } = section;

    let mut assertions: BTreeMap<String, Vec<AssertionRow>> = raw_assertions
        .into_iter()
        .map(|(api, rows)| {
            let entries = match api {
                ApiName::Atk => normalize_atk_rows(&rows),
                _ => rows.into_iter().map(AssertionRow::Raw).collect(),
            };
            (api.as_str().to_string(), entries)
        })
        .collect();
    assertions.insert(PLACEHOLDER_API.to_string(), placeholder_rows());

    let title_reference = match attributes.get("reference") {
        Some(reference) => format!("<a href='{reference}'>{title}</a>"),
        None => title.clone(),
    };

    let example_code = match code_fragment {
        Some(fragment) => fragment.replace(CODE_PLACEHOLDER, &example_code),
        None => example_code,
    };

    Ok(TestFixture {
        title,
        title_reference,
        example_code,
        assertions,
        attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use testable_statements_core::{Expectation, NormalizedAssertion};

    fn section_with(api: ApiName, rows: &[&[&str]]) -> StatementSection {
        let mut section = StatementSection::new("aria-sort");
        section.example_code = "<div role=\"columnheader\" id=\"test\" aria-sort=\"none\">x</div>\n".into();
        section.raw_assertions.insert(
            api,
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        );
        section
    }

    #[test]
    fn test_atk_rows_are_normalized_and_others_kept_raw() {
        let mut section = section_with(
            ApiName::Atk,
            &[&["object attribute sort", "not exposed"], &["ROLE_COLUMN_HEADER"]],
        );
        section.raw_assertions.insert(
            ApiName::Uia,
            vec![vec!["ItemStatus".into(), "<shown>".into()]],
        );

        let fixture = build_fixture(section, None).expect("section is complete");
        assert_eq!(
            fixture.assertions_for(ApiName::Atk).unwrap(),
            &[
                AssertionRow::Normalized(NormalizedAssertion::attribute("sort", Expectation::False)),
                AssertionRow::Normalized(NormalizedAssertion::role(
                    "ROLE_COLUMN_HEADER",
                    Expectation::True
                )),
            ]
        );
        // Raw rows of other APIs are not touched, not even `<shown>`.
        assert_eq!(
            fixture.assertions_for(ApiName::Uia).unwrap(),
            &[AssertionRow::Raw(vec!["ItemStatus".into(), "<shown>".into()])]
        );
        assert_eq!(fixture.assertions[PLACEHOLDER_API], placeholder_rows());
    }

    #[test]
    fn test_section_without_code_is_skipped() {
        let mut section = section_with(ApiName::Atk, &[&["ROLE_TABLE_CELL"]]);
        section.example_code.clear();
        assert_eq!(build_fixture(section, None), Err(SkipReason::EmptyExampleCode));
    }

    #[test]
    fn test_section_without_rows_is_skipped() {
        let section = section_with(ApiName::Atk, &[]);
        assert_eq!(build_fixture(section, None), Err(SkipReason::NoAssertions));
    }

    #[test]
    fn test_title_reference_links_to_reference_attribute() {
        let mut section = section_with(ApiName::Atk, &[&["ROLE_TABLE_CELL"]]);
        section.attributes.insert(
            "reference".into(),
            "https://www.w3.org/TR/wai-aria-1.1/#aria-sort".into(),
        );
        let fixture = build_fixture(section, None).unwrap();
        assert_eq!(
            fixture.title_reference,
            "<a href='https://www.w3.org/TR/wai-aria-1.1/#aria-sort'>aria-sort</a>"
        );
        assert_eq!(
            fixture.reference(),
            Some("https://www.w3.org/TR/wai-aria-1.1/#aria-sort")
        );
    }

    #[test]
    fn test_plain_title_reference_without_attribute() {
        let section = section_with(ApiName::Atk, &[&["ROLE_TABLE_CELL"]]);
        let fixture = build_fixture(section, None).unwrap();
        assert_eq!(fixture.title_reference, "aria-sort");
    }

    #[test]
    fn test_code_fragment_wraps_example() {
        let mut section = section_with(ApiName::Atk, &[&["ROLE_IMAGE"]]);
        section.example_code = "<rect id=\"test\" role=\"img\"/>\n".into();
        let fixture = build_fixture(
            section,
            Some("<svg xmlns=\"http://www.w3.org/2000/svg\">\n%code%</svg>"),
        )
        .unwrap();
        assert_eq!(
            fixture.example_code,
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n<rect id=\"test\" role=\"img\"/>\n</svg>"
        );
    }
}
