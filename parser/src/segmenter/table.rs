//! Row accumulation for one statement table.

use std::collections::BTreeMap;

use testable_statements_core::{ApiName, RawRow};
use tracing::debug;

/// Row-type label still owed to following rows.
#[derive(Debug, Clone)]
struct PendingRowType {
    label: String,
    remaining: usize,
}

/// Collects table cells into per-API rows.
///
/// Rows are created lazily: advancing the cursor past the last row does not
/// materialize an empty row until a cell or a row-type label lands in it.
#[derive(Debug, Default)]
pub(super) struct TableBuilder {
    rows: BTreeMap<ApiName, Vec<RawRow>>,
    active_api: Option<ApiName>,
    cursor: usize,
    pending_type: Option<PendingRowType>,
}

impl TableBuilder {
    /// Handles `|-`: closes the current row and seeds the next one with any
    /// pending row-type label.
    pub(super) fn end_row(&mut self) {
        let Some(api) = self.active_api else {
            return;
        };
        if !self.current_row_is_empty(api) {
            self.cursor += 1;
        }

        let Some(pending) = self.pending_type.as_mut() else {
            return;
        };
        let label = pending.label.clone();
        pending.remaining = pending.remaining.saturating_sub(1);
        if pending.remaining == 0 {
            self.pending_type = None;
        }

        let row = self.current_row_mut(api);
        if row.is_empty() {
            row.push(label);
        }
    }

    /// Handles a row span whose text is an API name: starts a fresh group.
    pub(super) fn start_api(&mut self, api: ApiName) {
        if self.rows.contains_key(&api) {
            debug!(api = %api, "API group restarted; earlier rows replaced");
        }
        self.active_api = Some(api);
        self.cursor = 0;
        self.rows.insert(api, vec![Vec::new()]);
        self.pending_type = None;
    }

    /// Handles a row span whose text is a row-type label spanning `count`
    /// rows, this one included.
    pub(super) fn start_row_type(&mut self, label: &str, count: usize) {
        let Some(api) = self.active_api else {
            debug!(label, "Row type before any API marker ignored");
            return;
        };

        let remaining = count.saturating_sub(1);
        self.pending_type = (remaining > 0).then(|| PendingRowType {
            label: label.to_string(),
            remaining,
        });

        if !self.current_row_is_empty(api) {
            self.cursor += 1;
        }
        self.current_row_mut(api).push(label.to_string());
    }

    /// Handles a plain `|text` cell.
    pub(super) fn push_cell(&mut self, text: &str) {
        if let Some(api) = self.active_api {
            self.current_row_mut(api).push(text.to_string());
        }
    }

    /// Returns the collected rows with empty rows dropped. API groups that
    /// ended up with no rows are kept as empty sequences.
    pub(super) fn finish(self) -> BTreeMap<ApiName, Vec<RawRow>> {
        self.rows
            .into_iter()
            .map(|(api, rows)| (api, rows.into_iter().filter(|row| !row.is_empty()).collect()))
            .collect()
    }

    fn current_row_is_empty(&self, api: ApiName) -> bool {
        self.rows
            .get(&api)
            .and_then(|rows| rows.get(self.cursor))
            .is_none_or(Vec::is_empty)
    }

    fn current_row_mut(&mut self, api: ApiName) -> &mut RawRow {
        let rows = self.rows.entry(api).or_default();
        if rows.len() <= self.cursor {
            rows.resize_with(self.cursor + 1, Vec::new);
        }
        &mut rows[self.cursor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_row_type_spans_count_rows() {
        let mut table = TableBuilder::default();
        table.start_api(ApiName::Atk);
        table.start_row_type("object attribute", 3);
        table.push_cell("xml-roles");
        table.end_row();
        table.push_cell("level");
        table.end_row();
        table.push_cell("sort");
        table.end_row();
        table.push_cell("ROLE_TABLE_CELL");

        let rows = table.finish();
        assert_eq!(
            rows[&ApiName::Atk],
            vec![
                row(&["object attribute", "xml-roles"]),
                row(&["object attribute", "level"]),
                row(&["object attribute", "sort"]),
                row(&["ROLE_TABLE_CELL"]),
            ]
        );
    }

    #[test]
    fn test_row_type_after_filled_row_starts_new_row() {
        let mut table = TableBuilder::default();
        table.start_api(ApiName::Msaa);
        table.push_cell("ROLE_SYSTEM_CELL");
        table.start_row_type("state", 1);
        table.push_cell("STATE_SYSTEM_BUSY");
        table.end_row();
        table.push_cell("loose");

        let rows = table.finish();
        assert_eq!(
            rows[&ApiName::Msaa],
            vec![
                row(&["ROLE_SYSTEM_CELL"]),
                row(&["state", "STATE_SYSTEM_BUSY"]),
                row(&["loose"]),
            ]
        );
    }

    #[test]
    fn test_new_api_clears_pending_row_type() {
        let mut table = TableBuilder::default();
        table.start_api(ApiName::Uia);
        table.start_row_type("property", 4);
        table.push_cell("ControlType");
        table.end_row();
        table.start_api(ApiName::Atk);
        table.push_cell("ROLE_CELL");
        table.end_row();
        table.push_cell("STATE_BUSY");

        // The separator already seeded a label-only row before ATK took over.
        let rows = table.finish();
        assert_eq!(
            rows[&ApiName::Uia],
            vec![row(&["property", "ControlType"]), row(&["property"])]
        );
        assert_eq!(
            rows[&ApiName::Atk],
            vec![row(&["ROLE_CELL"]), row(&["STATE_BUSY"])]
        );
    }

    #[test]
    fn test_consecutive_separators_do_not_create_empty_rows() {
        let mut table = TableBuilder::default();
        table.start_api(ApiName::Axapi);
        table.end_row();
        table.push_cell("AXRole");
        table.end_row();
        table.end_row();
        table.push_cell("AXSubrole");

        let rows = table.finish();
        assert_eq!(rows[&ApiName::Axapi], vec![row(&["AXRole"]), row(&["AXSubrole"])]);
    }

    #[test]
    fn test_api_without_rows_yields_empty_group() {
        let mut table = TableBuilder::default();
        table.start_api(ApiName::IAccessible2);
        table.end_row();
        let rows = table.finish();
        assert_eq!(rows.get(&ApiName::IAccessible2), Some(&Vec::new()));
    }

    #[test]
    fn test_cells_before_any_api_are_ignored() {
        let mut table = TableBuilder::default();
        table.push_cell("Header");
        table.start_row_type("role", 2);
        table.end_row();
        assert!(table.finish().is_empty());
    }
}
