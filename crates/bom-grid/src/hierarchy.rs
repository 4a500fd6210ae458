//! Visible-row assembly over the `parentId` forest.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, warn};

use bom_model::Item;

use crate::sort::{SortState, sort_siblings};

/// Ids of the currently expanded items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    expanded: BTreeSet<String>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given ids expanded.
    pub fn with_expanded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expanded: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip one id. Applying it twice restores the previous state.
    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_string());
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    /// Expand every item flagged as having children.
    pub fn expand_all(&mut self, items: &[Item]) {
        self.expanded.extend(
            items
                .iter()
                .filter(|item| item.has_children)
                .map(|item| item.id.clone()),
        );
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }
}

/// One rendered grid row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRow<'a> {
    pub item: &'a Item,
    /// Nesting depth below the top-level group.
    pub depth: usize,
    pub expanded: bool,
    /// Whether the row shows an expand affordance: the item has children and
    /// at least one of them is in the collection being rendered.
    pub expandable: bool,
}

struct Builder<'a, 's> {
    children: HashMap<&'a str, Vec<&'a Item>>,
    expand: &'s ExpandState,
    sort: &'s SortState,
    emitted: HashSet<&'a str>,
    rows: Vec<VisibleRow<'a>>,
}

impl<'a> Builder<'a, '_> {
    fn emit_group(&mut self, mut group: Vec<&'a Item>, depth: usize) {
        sort_siblings(&mut group, self.sort);
        for item in group {
            if !self.emitted.insert(item.id.as_str()) {
                warn!(id = %item.id, "item reached twice while building rows, skipping");
                continue;
            }
            let kids = if item.has_children {
                self.children.get(item.id.as_str()).cloned()
            } else {
                None
            };
            let expandable = kids.as_ref().is_some_and(|kids| !kids.is_empty());
            let expanded = self.expand.is_expanded(&item.id);
            self.rows.push(VisibleRow {
                item,
                depth,
                expanded,
                expandable,
            });
            if let Some(kids) = kids
                && expanded
            {
                self.emit_group(kids, depth + 1);
            }
        }
    }
}

/// Build the ordered visible rows for a (possibly filtered) collection.
///
/// Roots are the `level == 0` items. Each group of siblings is sorted on its
/// own, and children of an item appear only while it is expanded.
pub fn visible_rows<'a>(
    items: &[&'a Item],
    expand: &ExpandState,
    sort: &SortState,
) -> Vec<VisibleRow<'a>> {
    let mut children: HashMap<&'a str, Vec<&'a Item>> = HashMap::new();
    for &item in items {
        if let Some(parent) = item.parent_id.as_deref() {
            children.entry(parent).or_default().push(item);
        }
    }
    let roots: Vec<&'a Item> = items.iter().copied().filter(|item| item.level == 0).collect();

    let mut builder = Builder {
        children,
        expand,
        sort,
        emitted: HashSet::new(),
        rows: Vec::new(),
    };
    builder.emit_group(roots, 0);
    debug!(
        items = items.len(),
        rows = builder.rows.len(),
        expanded = expand.len(),
        "built visible rows"
    );
    builder.rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parent: Option<&str>, level: u32, has_children: bool) -> Item {
        let mut item = Item::new(id, parent, level, format!("P-{id}"));
        item.has_children = has_children;
        item
    }

    fn forest() -> Vec<Item> {
        vec![
            node("1", None, 0, true),
            node("2", Some("1"), 1, true),
            node("3", Some("2"), 2, false),
            node("4", Some("1"), 1, false),
            node("5", None, 0, false),
        ]
    }

    fn row_ids(rows: &[VisibleRow<'_>]) -> Vec<String> {
        rows.iter().map(|row| row.item.id.clone()).collect()
    }

    #[test]
    fn collapsed_root_hides_subtree() {
        let items = forest();
        let refs: Vec<&Item> = items.iter().collect();
        let rows = visible_rows(&refs, &ExpandState::with_expanded(["1"]), &SortState::none());
        assert_eq!(row_ids(&rows), ["1", "2", "4", "5"]);

        let rows = visible_rows(
            &refs,
            &ExpandState::with_expanded(["1", "2"]),
            &SortState::none(),
        );
        assert_eq!(row_ids(&rows), ["1", "2", "3", "4", "5"]);
        assert_eq!(rows[2].depth, 2);
    }

    #[test]
    fn expanded_child_under_collapsed_parent_stays_hidden() {
        let items = forest();
        let refs: Vec<&Item> = items.iter().collect();
        let rows = visible_rows(&refs, &ExpandState::with_expanded(["2"]), &SortState::none());
        assert_eq!(row_ids(&rows), ["1", "5"]);
    }

    #[test]
    fn filtered_out_children_hide_the_affordance() {
        let items = forest();
        let refs: Vec<&Item> = items.iter().filter(|item| item.id != "3").collect();
        let rows = visible_rows(
            &refs,
            &ExpandState::with_expanded(["1", "2"]),
            &SortState::none(),
        );
        let two = rows.iter().find(|row| row.item.id == "2").unwrap();
        assert!(two.expanded);
        assert!(!two.expandable);
        assert!(rows[0].expandable);
    }

    #[test]
    fn parent_cycle_terminates() {
        let items = vec![node("a", Some("b"), 0, true), node("b", Some("a"), 1, true)];
        let refs: Vec<&Item> = items.iter().collect();
        let mut expand = ExpandState::new();
        expand.expand_all(&items);
        let rows = visible_rows(&refs, &expand, &SortState::none());
        assert_eq!(row_ids(&rows), ["a", "b"]);
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut expand = ExpandState::with_expanded(["1"]);
        let before = expand.clone();
        expand.toggle("7");
        assert!(expand.is_expanded("7"));
        expand.toggle("7");
        assert_eq!(expand, before);
        expand.toggle("1");
        expand.toggle("1");
        assert_eq!(expand, before);
    }

    #[test]
    fn expand_all_and_collapse_all() {
        let items = forest();
        let mut expand = ExpandState::new();
        expand.expand_all(&items);
        assert_eq!(expand.ids().collect::<Vec<_>>(), ["1", "2"]);
        expand.collapse_all();
        assert!(expand.is_empty());
    }
}
