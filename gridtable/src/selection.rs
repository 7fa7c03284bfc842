//! Selection reconciler.
//!
//! Rows are replaced wholesale on every reload, so the selected row cannot
//! be tracked by position or identity. Instead the selection remembers a
//! key: a leaf column and the selected row's value in it. After a reload the
//! first row whose value in that column compares equal becomes selected
//! again; if none does, the selection is cleared.

use crate::layout::LeafMeta;
use crate::value::{CellValue, Row, value_at};

/// Selected row plus the key used to find it again.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    /// Index into the current rows.
    row: Option<usize>,
    /// Key column (leaf index).
    column: usize,
    /// Value of the selected row in the key column when last seen.
    value: Option<CellValue>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected row in the current rows.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Key column.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Key column and remembered value, if anything is selected.
    pub fn key(&self) -> Option<(usize, &CellValue)> {
        self.value.as_ref().map(|v| (self.column, v))
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.row == Some(row)
    }

    pub fn clear(&mut self) {
        self.row = None;
        self.value = None;
    }

    /// Select `row`, keyed by its value in `column`.
    pub fn select_row(&mut self, rows: &[Row], row: usize, column: usize) {
        match rows.get(row) {
            Some(values) => {
                self.row = Some(row);
                self.column = column;
                self.value = Some(value_at(values, column).clone());
            }
            None => self.clear(),
        }
    }

    /// Select the first row, keeping the current key column.
    pub fn select_first(&mut self, rows: &[Row]) {
        let column = self.column;
        self.select_row(rows, 0, column);
    }

    /// Position of the first row whose value in `column` compares equal to
    /// `value` under that leaf's cell type.
    pub fn find(rows: &[Row], leaves: &[LeafMeta], column: usize, value: &CellValue) -> Option<usize> {
        let leaf = leaves.get(column)?;
        rows.iter()
            .position(|row| leaf.column.cell_type.compare(value_at(row, column), value).is_eq())
    }

    /// Re-resolve the remembered key against freshly loaded rows.
    ///
    /// Returns whether a row was found. No match, or no key, clears the
    /// selection.
    pub fn reconcile(&mut self, rows: &[Row], leaves: &[LeafMeta]) -> bool {
        let found = self
            .key()
            .and_then(|(column, value)| Self::find(rows, leaves, column, value));
        match found {
            Some(row) => {
                let column = self.column;
                self.select_row(rows, row, column);
                true
            }
            None => {
                self.clear();
                false
            }
        }
    }

    /// Follow the selected row through a reorder (`order[new] = old`).
    pub fn remap(&mut self, order: &[usize]) {
        if let Some(old) = self.row {
            self.row = order.iter().position(|&i| i == old);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cell::Number;
    use crate::column::{Column, ColumnNode};
    use crate::layout::HeaderLayout;
    use crate::row;

    fn leaves() -> Vec<LeafMeta> {
        let tree = vec![
            ColumnNode::leaf(Column::new("id").cell_type(Arc::new(Number)).selectable()),
            ColumnNode::leaf(Column::new("name")),
        ];
        HeaderLayout::new(&tree).unwrap().leaves().to_vec()
    }

    #[test]
    fn test_reconcile_matches_by_value_not_position() {
        let leaves = leaves();
        let before = vec![row![1, "a"], row![2, "b"], row![3, "c"]];
        let mut sel = Selection::new();
        sel.select_row(&before, 1, 0);

        let after = vec![row![3, "c"], row![2, "b"], row![1, "a"]];
        assert!(sel.reconcile(&after, &leaves));
        assert_eq!(sel.row(), Some(1));

        let gone = vec![row![9, "z"]];
        assert!(!sel.reconcile(&gone, &leaves));
        assert_eq!(sel.row(), None);
        assert!(sel.key().is_none());
    }

    #[test]
    fn test_reconcile_uses_cell_type_compare() {
        // Number compare treats "2" and 2.0 as equal.
        let leaves = leaves();
        let mut sel = Selection::new();
        sel.select_row(&[row![2, "b"]], 0, 0);
        let reloaded = vec![row!["1", "a"], row!["2", "b"]];
        assert!(sel.reconcile(&reloaded, &leaves));
        assert_eq!(sel.row(), Some(1));
    }

    #[test]
    fn test_reconcile_distinguishes_non_numeric_values() {
        let leaves = leaves();
        let mut sel = Selection::new();
        sel.select_row(&[row!["n/a", "alpha"]], 0, 0);

        let reloaded = vec![row!["offline", "beta"], row![3, "gamma"]];
        assert!(!sel.reconcile(&reloaded, &leaves));
        assert_eq!(sel.row(), None);

        sel.select_row(&[row!["n/a", "alpha"]], 0, 0);
        let reloaded = vec![row!["-", "beta"], row!["n/a", "alpha"]];
        assert!(sel.reconcile(&reloaded, &leaves));
        assert_eq!(sel.row(), Some(1));
    }

    #[test]
    fn test_reconcile_picks_first_match() {
        let leaves = leaves();
        let mut sel = Selection::new();
        sel.select_row(&[row![5, "x"]], 0, 0);
        let reloaded = vec![row![4, "a"], row![5, "b"], row![5, "c"]];
        sel.reconcile(&reloaded, &leaves);
        assert_eq!(sel.row(), Some(1));
    }

    #[test]
    fn test_select_first_on_empty_clears() {
        let mut sel = Selection::new();
        sel.select_first(&[]);
        assert_eq!(sel.row(), None);
        sel.select_first(&[row![1, "a"]]);
        assert_eq!(sel.row(), Some(0));
        assert_eq!(sel.key(), Some((0, &CellValue::from(1))));
    }

    #[test]
    fn test_remap_follows_row() {
        let mut sel = Selection::new();
        sel.select_row(&[row![1], row![2], row![3]], 0, 0);
        sel.remap(&[2, 1, 0]);
        assert_eq!(sel.row(), Some(2));
    }

    #[test]
    fn test_find_unknown_column() {
        assert_eq!(Selection::find(&[row![1]], &leaves(), 5, &CellValue::from(1)), None);
    }
}
