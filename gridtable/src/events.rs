//! Event handling for the table.
//!
//! Rendered elements carry their handler wiring as `data-*` attributes.
//! A host forwards the id of the clicked element to [`Table::on_click`],
//! which resolves the nearest clickable element and dispatches on its
//! `data-action`.

use htmldom::Element;

use crate::render::{ACTION_SELECT, ACTION_SORT};
use crate::state::Table;

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled.
    Consumed,
    /// Event was not handled.
    Ignored,
}

impl EventResult {
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

/// A user interaction with the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// Click on a sortable leaf header.
    HeaderClick { column: usize },
    /// Click on a body cell.
    RowClick { row: usize, column: usize },
}

impl TableEvent {
    /// Decode the wiring of a rendered element.
    pub fn from_element(element: &Element) -> Option<Self> {
        let index = |key: &str| element.get_data(key).and_then(|v| v.parse::<usize>().ok());
        match element.get_data("action").map(String::as_str) {
            Some(ACTION_SORT) => Some(Self::HeaderClick {
                column: index("column")?,
            }),
            Some(ACTION_SELECT) => Some(Self::RowClick {
                row: index("row")?,
                column: index("column")?,
            }),
            _ => None,
        }
    }
}

impl Table {
    /// Handle a click whose raw target has element id `target`.
    pub fn on_click(&self, target: &str) -> EventResult {
        let event = self.inner.read().ok().and_then(|g| {
            let root = g.markup.as_ref()?;
            htmldom::find_target(root, target).and_then(TableEvent::from_element)
        });

        match event {
            Some(event) => self.handle_event(event),
            None => {
                log::trace!("{}: no handler for click on {target:?}", self.id());
                EventResult::Ignored
            }
        }
    }

    /// Dispatch a decoded event.
    pub fn handle_event(&self, event: TableEvent) -> EventResult {
        match event {
            TableEvent::HeaderClick { column } => self.on_header_click(column),
            TableEvent::RowClick { row, column } => self.on_row_click(row, column),
        }
    }

    /// Handle header click for sorting.
    ///
    /// Re-sorts and re-renders, then saves the new sort state.
    pub fn on_header_click(&self, column: usize) -> EventResult {
        if self.toggle_sort(column) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// Handle a click on a body cell.
    ///
    /// Selects the row and re-renders. Then, outside any lock, the clicked
    /// leaf's `on_select` runs if the leaf is selectable, followed by the
    /// row select action if one is configured.
    pub fn on_row_click(&self, row: usize, column: usize) -> EventResult {
        if self.click_row(row, column) {
            EventResult::Consumed
        } else {
            log::debug!("{}: ignoring click on missing row {row}", self.id());
            EventResult::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wiring() {
        let th = Element::th().data("action", "sort").data("column", "3");
        assert_eq!(
            TableEvent::from_element(&th),
            Some(TableEvent::HeaderClick { column: 3 })
        );

        let td = Element::td()
            .data("action", "select")
            .data("row", "1")
            .data("column", "0");
        assert_eq!(
            TableEvent::from_element(&td),
            Some(TableEvent::RowClick { row: 1, column: 0 })
        );
    }

    #[test]
    fn test_decode_rejects_incomplete_wiring() {
        assert_eq!(TableEvent::from_element(&Element::td()), None);
        let td = Element::td().data("action", "select").data("row", "1");
        assert_eq!(TableEvent::from_element(&td), None);
        let th = Element::th().data("action", "drag").data("column", "1");
        assert_eq!(TableEvent::from_element(&th), None);
    }
}
