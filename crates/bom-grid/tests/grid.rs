//! End-to-end grid pipeline tests over a small JSON fixture.

use bom_grid::{ColumnKey, GridView, SortDirection, SortState};
use bom_model::Item;

fn fixture() -> Vec<Item> {
    serde_json::from_str(
        r#"[
            {"id": "1", "parentId": null, "level": 0, "hasChildren": true,
             "itemNumber": "ASM-100", "orderable": false, "overallReadiness": 70, "leadTime": 30},
            {"id": "2", "parentId": "1", "level": 1, "hasChildren": true,
             "itemNumber": "ASM-110", "orderable": true, "overallReadiness": 90},
            {"id": "3", "parentId": "2", "level": 2, "hasChildren": false,
             "itemNumber": "PRT-111", "orderable": true, "overallReadiness": 95, "leadTime": 10},
            {"id": "4", "parentId": "1", "level": 1, "hasChildren": false,
             "itemNumber": "PRT-120", "orderable": false, "overallReadiness": 40, "leadTime": 30},
            {"id": "5", "parentId": "1", "level": 1, "hasChildren": false,
             "itemNumber": "PRT-130", "orderable": true, "overallReadiness": 60, "leadTime": 10}
        ]"#,
    )
    .expect("fixture parses")
}

fn ids(view: &GridView, items: &[Item]) -> Vec<String> {
    view.rows(items).iter().map(|row| row.item.id.clone()).collect()
}

#[test]
fn expanding_the_second_level_reveals_grandchildren() {
    let items = fixture();
    let view = GridView::with_expanded(["1"]);
    assert_eq!(ids(&view, &items), ["1", "2", "4", "5"]);

    let view = GridView::with_expanded(["1", "2"]);
    assert_eq!(ids(&view, &items), ["1", "2", "3", "4", "5"]);
}

#[test]
fn orderable_yes_filter_hides_non_orderable_root_and_subtree() {
    let items = fixture();
    let mut view = GridView::with_expanded(["1", "2"]);
    view.columns.set(ColumnKey::Orderable, vec!["Yes".to_string()]);

    let filtered: Vec<&str> = view.filtered(&items).iter().map(|i| i.id.as_str()).collect();
    assert_eq!(filtered, ["2", "3", "5"]);
    assert!(view.rows(&items).is_empty());
}

#[test]
fn sorting_reorders_siblings_without_flattening() {
    let items = fixture();
    let mut view = GridView::with_expanded(["1", "2"]);
    view.sort = SortState::new(ColumnKey::OverallReadiness, SortDirection::Asc);
    assert_eq!(ids(&view, &items), ["1", "4", "5", "2", "3"]);

    view.sort = SortState::new(ColumnKey::OverallReadiness, SortDirection::Desc);
    assert_eq!(ids(&view, &items), ["1", "2", "3", "5", "4"]);
}

#[test]
fn sort_toggle_returns_to_source_order() {
    let items = fixture();
    let mut view = GridView::with_expanded(["1"]);
    view.toggle_sort(ColumnKey::LeadTime);
    assert_eq!(ids(&view, &items), ["1", "2", "5", "4"]);
    view.toggle_sort(ColumnKey::LeadTime);
    assert_eq!(ids(&view, &items), ["1", "4", "5", "2"]);
    view.toggle_sort(ColumnKey::LeadTime);
    assert_eq!(ids(&view, &items), ["1", "2", "4", "5"]);
}

#[test]
fn column_values_follow_panel_filters_only() {
    let items = fixture();
    let mut view = GridView::new();
    view.columns.set(ColumnKey::LeadTime, vec!["10 days".to_string()]);
    assert_eq!(
        view.column_values(&items, ColumnKey::LeadTime),
        ["-", "10 days", "30 days"]
    );

    view.panel.orderable = Some(true);
    assert_eq!(
        view.column_values(&items, ColumnKey::LeadTime),
        ["-", "10 days"]
    );
    assert_eq!(view.active_filter_count(), 2);
}

#[test]
fn toggling_expansion_twice_restores_rows() {
    let items = fixture();
    let mut view = GridView::with_expanded(["1"]);
    let before = ids(&view, &items);
    view.toggle_expand("2");
    assert_ne!(ids(&view, &items), before);
    view.toggle_expand("2");
    assert_eq!(ids(&view, &items), before);
}
