//! Table rendering.
//!
//! Produces the full `<table>` element tree from the current state. Nothing
//! is patched incrementally: every operation that changes what is visible
//! re-renders from scratch.

use htmldom::Element;

use crate::container::Container;
use crate::layout::{HeaderCell, LeafMeta};
use crate::sort::SortState;
use crate::state::TableInner;
use crate::value::{Row, value_at};
use crate::visibility::Visibility;

/// `data-action` of a sortable leaf header.
pub const ACTION_SORT: &str = "sort";
/// `data-action` of a body cell.
pub const ACTION_SELECT: &str = "select";

/// Render the whole table.
pub(crate) fn render_table(inner: &TableInner) -> Element {
    let mut root = Element::table()
        .id(inner.container.id())
        .class("gridtable")
        .class_if("sort-disabled", !inner.sort_enabled);

    if let Some(caption) = &inner.options.caption {
        root = root.child(Element::caption(caption.as_str()));
    }

    let thead = Element::thead().children(
        inner
            .layout
            .rows()
            .iter()
            .map(|cells| render_header_row(inner, cells)),
    );

    let tbody = if inner.rows.is_empty() {
        Element::tbody().child(render_placeholder(inner))
    } else {
        Element::tbody().children(
            inner
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| render_row(inner, index, row)),
        )
    };

    root.child(thead).child(tbody)
}

fn render_header_row(inner: &TableInner, cells: &[HeaderCell]) -> Element {
    Element::tr().children(cells.iter().map(|cell| match cell.leaf {
        Some(index) => match inner.layout.leaf(index) {
            Some(leaf) => render_leaf_header(
                &inner.container,
                cell,
                leaf,
                inner.sort,
                inner.sort_enabled,
                &inner.visibility,
            ),
            None => render_group_header(cell),
        },
        None => render_group_header(cell),
    }))
}

/// Group header spanning its leaves.
fn render_group_header(cell: &HeaderCell) -> Element {
    Element::th()
        .class("group")
        .colspan(cell.colspan)
        .rowspan(cell.rowspan)
        .text(cell.label.as_str())
}

/// Leaf header with its sort indicator.
pub(crate) fn render_leaf_header(
    container: &Container,
    cell: &HeaderCell,
    leaf: &LeafMeta,
    sort: SortState,
    sort_enabled: bool,
    visibility: &Visibility,
) -> Element {
    let column = &leaf.column;
    let th = Element::th()
        .id(container.header_id(leaf.index))
        .class("leaf")
        .class(column.align.class())
        .colspan(cell.colspan)
        .rowspan(cell.rowspan);

    // Hidden leaves keep their slot so the grid stays aligned
    if visibility.is_hidden(leaf.index) {
        return th.class("hidden");
    }

    let label = Element::span().class("label").text(cell.label.as_str());
    if !(column.sortable && sort_enabled) {
        return th.child(label);
    }

    let indicator = sort.indicator(leaf.index);
    th.class("sortable")
        .class(indicator.class())
        .data("action", ACTION_SORT)
        .data("column", leaf.index.to_string())
        .clickable(true)
        .child(label)
        .child(
            Element::span()
                .class("sort-indicator")
                .text(indicator.glyph()),
        )
}

/// Single full-width row shown when there is no data.
fn render_placeholder(inner: &TableInner) -> Element {
    Element::tr().class("empty").child(
        Element::td()
            .class("placeholder")
            .colspan(inner.layout.width())
            .html(inner.placeholder_text()),
    )
}

fn render_row(inner: &TableInner, index: usize, row: &Row) -> Element {
    let selected = inner.selection.is_selected(index);
    let tr = Element::tr()
        .id(inner.container.row_id(index))
        .class_if("selected", selected)
        .data("row", index.to_string());

    tr.children(inner.layout.leaves().iter().map(|leaf| {
        let column = &leaf.column;
        let td = Element::td()
            .id(inner.container.cell_id(index, leaf.index))
            .class(column.align.class())
            .style(column.style.as_str());

        if inner.visibility.is_hidden(leaf.index) {
            return td.class("hidden");
        }

        let value = value_at(row, leaf.index);
        td.class_if("selectable", column.selectable)
            .class_if("selected", selected && column.selectable)
            .data("action", ACTION_SELECT)
            .data("row", index.to_string())
            .data("column", leaf.index.to_string())
            .clickable(true)
            .content(column.cell_type.render(value))
    }))
}
