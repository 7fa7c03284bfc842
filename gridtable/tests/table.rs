//! Integration tests for table construction, rendering, sorting, visibility
//! and selection through the public API.

use std::sync::Arc;

use gridtable::{
    Alignment, CellValue, Column, ColumnNode, ConfigurationError, Number, Row, SortState, Table,
    TableOptions, VisibilityCommand, row,
};
use htmldom::{Content, Element, find_element};

fn tree() -> Vec<ColumnNode> {
    vec![
        ColumnNode::leaf(Column::new("Id").cell_type(Arc::new(Number)).selectable()),
        ColumnNode::group(
            "Server",
            [
                ColumnNode::leaf(Column::new("Host").selectable()),
                ColumnNode::leaf(Column::new("Tier").hideable()),
            ],
        ),
        ColumnNode::leaf(
            Column::new("Size")
                .cell_type(Arc::new(Number))
                .hideable()
                .align(Alignment::Right),
        ),
        ColumnNode::leaf(Column::new("Note").unsortable().hideable()),
    ]
}

fn rows() -> Vec<Row> {
    vec![
        row![3, "c", "hot", 30, "x"],
        row![1, "a", "cold", 10, "y"],
        row![2, "b", "hot", 20, "z"],
    ]
}

fn table() -> Table {
    Table::build("t", tree(), rows(), TableOptions::default(), None).unwrap()
}

fn section(root: &Element, tag: &str) -> Element {
    root.descendants()
        .find(|e| e.tag == tag)
        .cloned()
        .unwrap_or_else(|| panic!("no <{tag}> rendered"))
}

fn body(table: &Table) -> Vec<Element> {
    let markup = table.markup().expect("table renders on build");
    section(&markup, "tbody").child_elements().to_vec()
}

fn texts(tr: &Element) -> Vec<String> {
    tr.child_elements().iter().map(Element::text_content).collect()
}

fn column(table: &Table, index: usize) -> Vec<String> {
    table.rows().iter().map(|r| r[index].to_string()).collect()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_build_rejects_bad_container() {
    let err = Table::build("two words", tree(), rows(), TableOptions::default(), None).unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidContainer(_)));
}

#[test]
fn test_build_rejects_empty_group() {
    let tree = vec![
        ColumnNode::leaf(Column::new("a")),
        ColumnNode::group("nothing", Vec::new()),
    ];
    let err = Table::build("t", tree, Vec::new(), TableOptions::default(), None).unwrap_err();
    assert_eq!(err, ConfigurationError::EmptyGroup("nothing".into()));
}

#[test]
fn test_builder_matches_build() {
    let table = Table::builder("#t", tree())
        .rows(rows())
        .options(TableOptions::default().caption("Servers"))
        .build()
        .unwrap();
    assert_eq!(table.container_id(), "t");
    assert_eq!(table.len(), 3);
    let markup = table.markup().unwrap();
    assert_eq!(section(&markup, "caption").text_content(), "Servers");
}

#[test]
fn test_build_sorts_and_selects_first_row() {
    let table = table();
    assert_eq!(column(&table, 0), vec!["1", "2", "3"]);
    assert_eq!(table.selected_index(), Some(0));
    assert_eq!(table.selected_row().map(|r| r[1].to_string()), Some("a".into()));
    assert!(table.take_dirty(), "initial render marks the table dirty");
    assert!(!table.take_dirty());
}

// =============================================================================
// Header layout
// =============================================================================

#[test]
fn test_header_grid_spans() {
    let table = table();
    assert_eq!(table.width(), 5);
    assert_eq!(table.header_height(), 2);

    let markup = table.markup().unwrap();
    let thead = section(&markup, "thead");
    let header_rows = thead.child_elements();
    assert_eq!(header_rows.len(), 2);

    let top = header_rows[0].child_elements();
    let spans: Vec<(Option<&str>, Option<&str>)> = top
        .iter()
        .map(|th| {
            (
                th.get_attr("rowspan").map(String::as_str),
                th.get_attr("colspan").map(String::as_str),
            )
        })
        .collect();
    assert_eq!(
        spans,
        vec![
            (Some("2"), None),
            (None, Some("2")),
            (Some("2"), None),
            (Some("2"), None),
        ]
    );
    assert!(top[1].has_class("group"));
    assert_eq!(top[1].text_content(), "Server");
    assert_eq!(texts(&header_rows[1]), vec!["Host△", "Tier△"]);
}

#[test]
fn test_header_info_lists_leaves() {
    let table = table();
    table.display(Some(VisibilityCommand::Hide(2)));
    let info = table.header_info();
    let names: Vec<&str> = info.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Id", "Host", "Tier", "Size", "Note"]);
    assert!(!info[0].hideable);
    assert!(info[2].hidden);
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_body_cells_carry_wiring_and_alignment() {
    let table = table();
    let markup = table.markup().unwrap();

    let cell = find_element(&markup, "t-r1-c3").expect("cell id derived from container");
    assert_eq!(cell.text_content(), "20");
    assert!(cell.has_class("align-right"));
    assert_eq!(cell.get_data("action").map(String::as_str), Some("select"));
    assert_eq!(cell.get_data("row").map(String::as_str), Some("1"));
    assert_eq!(cell.get_data("column").map(String::as_str), Some("3"));

    let selected = find_element(&markup, "t-r0").unwrap();
    assert!(selected.has_class("selected"));
    assert!(!find_element(&markup, "t-r1").unwrap().has_class("selected"));
}

#[test]
fn test_sort_indicators() {
    let table = table();
    let markup = table.markup().unwrap();
    assert_eq!(find_element(&markup, "t-h0").unwrap().text_content(), "Id▲");
    assert_eq!(find_element(&markup, "t-h3").unwrap().text_content(), "Size△");
    assert_eq!(
        find_element(&markup, "t-h4").unwrap().text_content(),
        "Note",
        "unsortable columns have no indicator"
    );
}

#[test]
fn test_html_output_escapes_text() {
    let table = Table::build(
        "t",
        vec![ColumnNode::leaf(Column::new("Name"))],
        vec![row!["<b>&"]],
        TableOptions::default(),
        None,
    )
    .unwrap();
    let html = table.to_html();
    assert!(html.contains("&lt;b&gt;&amp;"), "{html}");
    assert!(!html.contains("<b>&"));
}

// =============================================================================
// Empty state
// =============================================================================

#[test]
fn test_empty_table_shows_placeholder_across_all_columns() {
    let table = Table::build(
        "t",
        tree(),
        Vec::new(),
        TableOptions::default().text_when_empty("<i>Nothing yet</i>"),
        None,
    )
    .unwrap();
    let body = body(&table);
    assert_eq!(body.len(), 1);
    assert!(body[0].has_class("empty"));
    let td = &body[0].child_elements()[0];
    assert_eq!(td.get_attr("colspan").map(String::as_str), Some("5"));
    assert_eq!(td.content, Content::Html("<i>Nothing yet</i>".into()));
    assert_eq!(table.selected_index(), None);
}

#[test]
fn test_erase_override_lasts_until_rows_return() {
    let table = table();
    table.erase(Some("Loading…"));
    assert!(table.is_empty());
    assert_eq!(table.selected_index(), None);
    assert_eq!(body(&table)[0].text_content(), "Loading…");

    // Empty loads keep the override
    table.load(Vec::new(), false);
    assert_eq!(body(&table)[0].text_content(), "Loading…");

    table.load(rows(), false);
    table.erase(None);
    assert_eq!(body(&table)[0].text_content(), "No data");
}

#[test]
fn test_erase_then_display_has_no_body_rows() {
    let table = table();
    table.erase(None);
    table.display(None);
    let body = body(&table);
    assert_eq!(body.len(), 1);
    assert!(body[0].has_class("empty"));
    assert!(find_element(&table.markup().unwrap(), "t-r0").is_none());
}

#[test]
fn test_every_loaded_row_is_rendered() {
    let table = table();
    let mut duplicated = rows();
    duplicated.extend(rows());
    duplicated.push(Row::new());
    table.load(duplicated.clone(), false);

    assert_eq!(table.len(), duplicated.len());
    let body = body(&table);
    assert_eq!(body.len(), duplicated.len(), "no dropping or deduplication");
    assert!(
        body.iter().all(|tr| tr.child_elements().len() == 5),
        "short rows are padded to the full width"
    );
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_reload_keeps_active_sort() {
    let table = table();
    table.on_header_click(3);
    table.on_header_click(3);
    assert_eq!(table.sort_state(), SortState::new(3, false));

    table.load(rows(), false);
    assert_eq!(column(&table, 3), vec!["30", "20", "10"]);
}

#[test]
fn test_descending_is_reverse_of_ascending() {
    let table = table();
    table.on_header_click(1);
    let ascending = table.rows();
    table.on_header_click(1);
    let mut descending = table.rows();
    descending.reverse();
    assert_eq!(ascending, descending);
}

#[test]
fn test_resort_is_stable_with_ties() {
    let table = table();
    table.on_header_click(2);
    let once = table.rows();
    table.load(once.clone(), true);
    assert_eq!(table.rows(), once, "ascending");

    table.on_header_click(2);
    let once = table.rows();
    table.load(once.clone(), true);
    assert_eq!(table.rows(), once, "descending");
}

#[test]
fn test_disabled_sort_keeps_input_order() {
    let table = table();
    table.enable_sort(false);
    assert!(!table.is_sort_enabled());

    table.load(rows(), false);
    assert_eq!(column(&table, 0), vec!["3", "1", "2"]);
    assert!(!table.on_header_click(0).is_consumed());

    let markup = table.markup().unwrap();
    let th = find_element(&markup, "t-h0").unwrap();
    assert!(!th.has_class("sortable"));
    assert_eq!(th.text_content(), "Id");

    table.enable_sort(true);
    assert_eq!(column(&table, 0), vec!["1", "2", "3"]);
}

#[test]
fn test_sort_disabled_by_options() {
    let table =
        Table::build("t", tree(), rows(), TableOptions::default().sortable(false), None).unwrap();
    assert_eq!(column(&table, 0), vec!["3", "1", "2"]);
}

#[test]
fn test_unsortable_column_ignores_clicks() {
    let table = table();
    assert!(!table.on_header_click(4).is_consumed());
    assert!(!table.on_header_click(99).is_consumed());
    assert_eq!(table.sort_state(), SortState::new(0, true));
}

// =============================================================================
// Visibility
// =============================================================================

#[test]
fn test_hidden_columns_keep_grid() {
    let table = table();
    let before: Vec<Vec<String>> = body(&table).iter().map(texts).collect();

    table.display(Some(VisibilityCommand::Hide(2)));
    table.display(Some(VisibilityCommand::Hide(4)));

    let after: Vec<Vec<String>> = body(&table).iter().map(texts).collect();
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(a.len(), table.width(), "every row keeps one cell per leaf");
        assert_eq!(a[2], "");
        assert_eq!(a[4], "");
        assert_eq!((&a[0], &a[1], &a[3]), (&b[0], &b[1], &b[3]));
    }

    let markup = table.markup().unwrap();
    assert!(find_element(&markup, "t-h2").unwrap().has_class("hidden"));
    let hidden_cell = find_element(&markup, "t-r0-c2").unwrap();
    assert!(hidden_cell.has_class("hidden"));
    assert!(!hidden_cell.clickable);

    table.display(Some(VisibilityCommand::ShowAll));
    let restored: Vec<Vec<String>> = body(&table).iter().map(texts).collect();
    assert_eq!(restored, before);
}

#[test]
fn test_fixed_column_cannot_be_hidden() {
    let table = table();
    table.display(Some(VisibilityCommand::HideAll));
    assert_eq!(
        table.hidden_flags(),
        vec![false, false, true, true, true],
        "only hideable leaves are hidden"
    );
    assert!(!table.is_hidden(0));
}

#[test]
fn test_display_without_command_rerenders() {
    let table = table();
    table.take_dirty();
    table.display(None);
    assert!(table.take_dirty());
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_selection_follows_value_across_reload() {
    let table = table();
    table.select(0, 2);
    assert_eq!(table.selected_index(), Some(1));

    table.load(
        vec![
            row![2, "b", "hot", 20, "z"],
            row![4, "d", "cold", 40, "w"],
            row![0, "o", "cold", 0, "v"],
        ],
        true,
    );
    let selected = table.selected_row().unwrap();
    assert_eq!(selected[0], CellValue::from(2));
    assert_eq!(table.selected_index(), Some(1), "row 2 sorts after 0 and before 4");
}

#[test]
fn test_selection_cleared_when_value_disappears() {
    let table = table();
    table.select(0, 3);
    table.load(vec![row![9, "z", "hot", 1, ""]], true);
    assert_eq!(table.selected_index(), None);
    let markup = table.markup().unwrap();
    assert!(!find_element(&markup, "t-r0").unwrap().has_class("selected"));
}

#[test]
fn test_reload_without_keep_selects_first_row() {
    let table = table();
    table.select(0, 3);
    table.load(rows(), false);
    assert_eq!(table.selected_index(), Some(0));
}

#[test]
fn test_select_on_non_selectable_column_is_ignored() {
    let table = table();
    table.select(2, "hot");
    assert_eq!(table.selected_index(), Some(0));
    table.select(42, 1);
    assert_eq!(table.selected_index(), Some(0));
}

#[test]
fn test_select_missing_value_clears() {
    let table = table();
    table.select(1, "nobody");
    assert_eq!(table.selected_index(), None);
    assert_eq!(table.selection_key(), None);
}

#[test]
fn test_selection_survives_resort() {
    let table = table();
    table.select(1, "c");
    table.on_header_click(0);
    assert_eq!(table.sort_state(), SortState::new(0, false));
    assert_eq!(table.selected_index(), Some(0));
    assert_eq!(table.selected_row().map(|r| r[1].to_string()), Some("c".into()));
}
