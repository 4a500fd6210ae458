//! Grid view state and the filter → sort → hierarchy pipeline.

use tracing::debug;

use bom_model::Item;

use crate::columns::{ColumnKey, ColumnPreset};
use crate::filter::{ColumnFilters, PanelFilters, apply_filters, unique_values};
use crate::hierarchy::{ExpandState, VisibleRow, visible_rows};
use crate::sort::SortState;

/// Everything the grid view holds between renders. None of it touches the
/// item collection.
#[derive(Debug, Clone, Default)]
pub struct GridView {
    pub panel: PanelFilters,
    pub columns: ColumnFilters,
    pub sort: SortState,
    pub expand: ExpandState,
    pub preset: ColumnPreset,
}

impl GridView {
    pub fn new() -> Self {
        Self::default()
    }

    /// View with the given ids pre-expanded.
    pub fn with_expanded<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expand: ExpandState::with_expanded(ids),
            ..Self::default()
        }
    }

    /// Items passing both filter layers, in source order.
    pub fn filtered<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        apply_filters(items, &self.panel, &self.columns)
    }

    /// Rows currently on screen.
    pub fn rows<'a>(&self, items: &'a [Item]) -> Vec<VisibleRow<'a>> {
        let filtered = self.filtered(items);
        let rows = visible_rows(&filtered, &self.expand, &self.sort);
        debug!(
            sort = ?self.sort.key(),
            direction = ?self.sort.direction(),
            rows = rows.len(),
            "rendered grid"
        );
        rows
    }

    /// Options for a column's filter dropdown.
    pub fn column_values(&self, items: &[Item], key: ColumnKey) -> Vec<String> {
        unique_values(items, &self.panel, key)
    }

    /// Visible columns under the active preset.
    pub fn visible_columns(&self) -> Vec<ColumnKey> {
        self.preset.columns()
    }

    pub fn toggle_sort(&mut self, key: ColumnKey) {
        self.sort.toggle(key);
    }

    pub fn toggle_expand(&mut self, id: &str) {
        self.expand.toggle(id);
    }

    /// Number of active panel filters plus columns with a selection.
    pub fn active_filter_count(&self) -> usize {
        self.panel.active_filter_count()
            + ColumnKey::all()
                .filter(|key| !self.columns.get(*key).is_empty())
                .count()
    }
}
