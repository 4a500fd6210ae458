//! Hierarchical BOM grid engine: column catalogue, filtering, sibling-group
//! sorting and visible-row assembly.

pub mod columns;
pub mod filter;
pub mod hierarchy;
pub mod search;
pub mod sort;
pub mod view;

pub use columns::{
    COLUMNS, CellFormat, CellValue, ColumnGroup, ColumnKey, ColumnPreset, ColumnSpec,
};
pub use filter::{ColumnFilters, PanelFilters, ReadinessRange, apply_filters, unique_values};
pub use hierarchy::{ExpandState, VisibleRow, visible_rows};
pub use search::search;
pub use sort::{SortDirection, SortState, collate, compare_values, sort_siblings};
pub use view::GridView;
