//! Sort engine.

use serde::{Deserialize, Serialize};

use crate::layout::LeafMeta;
use crate::value::{Row, value_at};

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Leaf index to sort by.
    pub column: usize,
    /// Ascending when true.
    pub forward: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: 0,
            forward: true,
        }
    }
}

impl SortState {
    pub fn new(column: usize, forward: bool) -> Self {
        Self { column, forward }
    }

    /// Apply a header click: flip direction on the active column, otherwise
    /// move to `column` and keep the direction.
    pub fn toggle(&mut self, column: usize) {
        if self.column == column {
            self.forward = !self.forward;
        } else {
            self.column = column;
        }
    }

    /// Indicator for the header of `column`.
    pub fn indicator(&self, column: usize) -> SortIndicator {
        match (self.column == column, self.forward) {
            (true, true) => SortIndicator::Ascending,
            (true, false) => SortIndicator::Descending,
            (false, _) => SortIndicator::Unsorted,
        }
    }
}

/// Sort direction marker shown in a sortable header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
    Unsorted,
}

impl SortIndicator {
    pub fn glyph(self) -> &'static str {
        match self {
            SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
            SortIndicator::Unsorted => "△",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            SortIndicator::Ascending => "sorted-asc",
            SortIndicator::Descending => "sorted-desc",
            SortIndicator::Unsorted => "unsorted",
        }
    }
}

/// Sort `rows` in place by the active leaf's comparator.
///
/// Returns the applied permutation (`order[new] = old`), or `None` when
/// sorting is disabled or the active column is absent or not sortable.
///
/// Ascending is a single stable sort. Descending is the reverse of a stable
/// sort of the reversed input, so re-sorting an already sorted sequence is
/// the identity in both directions.
pub fn sort_rows(
    rows: &mut Vec<Row>,
    leaves: &[LeafMeta],
    sort: SortState,
    enabled: bool,
) -> Option<Vec<usize>> {
    if !enabled {
        return None;
    }
    let leaf = leaves.get(sort.column)?;
    if !leaf.column.sortable {
        return None;
    }

    let column = sort.column;
    let cell_type = &leaf.column.cell_type;
    let mut indexed: Vec<(usize, Row)> = std::mem::take(rows).into_iter().enumerate().collect();

    if !sort.forward {
        indexed.reverse();
    }
    indexed.sort_by(|(_, a), (_, b)| cell_type.compare(value_at(a, column), value_at(b, column)));
    if !sort.forward {
        indexed.reverse();
    }

    let (order, sorted): (Vec<usize>, Vec<Row>) = indexed.into_iter().unzip();
    *rows = sorted;
    Some(order)
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
            ColumnNode::leaf(Column::new("name")),
            ColumnNode::leaf(Column::new("count").cell_type(Arc::new(Number))),
            ColumnNode::leaf(Column::new("note").unsortable()),
        ];
        HeaderLayout::new(&tree).unwrap().leaves().to_vec()
    }

    fn sample() -> Vec<Row> {
        vec![
            row!["b", 10, "x"],
            row!["a", 9, "y"],
            row!["c", 100, "z"],
            row!["a", 1, "w"],
        ]
    }

    fn names(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|r| r[0].to_string()).collect()
    }

    #[test]
    fn test_toggle_same_column_flips_direction() {
        let mut sort = SortState::new(1, true);
        sort.toggle(1);
        assert_eq!(sort, SortState::new(1, false));
    }

    #[test]
    fn test_toggle_other_column_keeps_direction() {
        let mut sort = SortState::new(1, false);
        sort.toggle(0);
        assert_eq!(sort, SortState::new(0, false));
    }

    #[test]
    fn test_indicator() {
        let sort = SortState::new(2, false);
        assert_eq!(sort.indicator(2), SortIndicator::Descending);
        assert_eq!(sort.indicator(0), SortIndicator::Unsorted);
        assert_eq!(SortState::new(0, true).indicator(0).glyph(), "▲");
    }

    #[test]
    fn test_numeric_sort() {
        let mut rows = sample();
        let order = sort_rows(&mut rows, &leaves(), SortState::new(1, true), true);
        let counts: Vec<String> = rows.iter().map(|r| r[1].to_string()).collect();
        assert_eq!(counts, vec!["1", "9", "10", "100"]);
        assert_eq!(order, Some(vec![3, 1, 0, 2]));
    }

    #[test]
    fn test_stable_for_ties() {
        let mut rows = sample();
        sort_rows(&mut rows, &leaves(), SortState::new(0, true), true);
        assert_eq!(names(&rows), vec!["a", "a", "b", "c"]);
        // Ties keep input order: count 9 came before count 1.
        assert_eq!(rows[0][1].to_string(), "9");
    }

    #[test]
    fn test_descending_reverses_distinct_keys() {
        let leaves = leaves();
        let mut asc = sample();
        sort_rows(&mut asc, &leaves, SortState::new(1, true), true);
        let mut desc = asc.clone();
        sort_rows(&mut desc, &leaves, SortState::new(1, false), true);
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn test_resort_is_idempotent_both_directions() {
        let leaves = leaves();
        for forward in [true, false] {
            let sort = SortState::new(0, forward);
            let mut once = sample();
            sort_rows(&mut once, &leaves, sort, true);
            let mut twice = once.clone();
            sort_rows(&mut twice, &leaves, sort, true);
            assert_eq!(once, twice, "forward = {forward}");
        }
    }

    #[test]
    fn test_disabled_or_unsortable_is_noop() {
        let leaves = leaves();
        let mut rows = sample();
        assert!(sort_rows(&mut rows, &leaves, SortState::new(1, true), false).is_none());
        assert!(sort_rows(&mut rows, &leaves, SortState::new(2, true), true).is_none());
        assert!(sort_rows(&mut rows, &leaves, SortState::new(9, true), true).is_none());
        assert_eq!(rows, sample());
    }
}
