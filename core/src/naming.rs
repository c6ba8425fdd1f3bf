//! Output file naming for fixtures.

/// Suffix appended to every fixture file name.
pub const FIXTURE_SUFFIX: &str = "-manual.html";

/// Derives the fixture file name from a statement title.
///
/// Steps, in order: strip trailing whitespace, drop quote characters, drop
/// `/`, collapse each whitespace run to one `_`, turn `=` into `_`, append
/// [`FIXTURE_SUFFIX`].
///
/// # Examples
///
/// ```
/// use testable_statements_core::fixture_file_name;
///
/// assert_eq!(fixture_file_name("aria-busy true  "), "aria-busy_true-manual.html");
/// assert_eq!(fixture_file_name("role=\"cell\""), "role_cell-manual.html");
/// ```
pub fn fixture_file_name(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + FIXTURE_SUFFIX.len());
    let mut in_whitespace = false;

    for ch in title
        .trim_end()
        .chars()
        .filter(|ch| !matches!(ch, '"' | '\'' | '/'))
    {
        if ch.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        name.push(if ch == '=' { '_' } else { ch });
    }

    name.push_str(FIXTURE_SUFFIX);
    name
}
