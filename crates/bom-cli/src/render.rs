//! Text helpers shared by the table printers.

use bom_grid::{ColumnKey, VisibleRow};

/// Item number indented by depth, with a disclosure marker on rows that can
/// expand.
pub fn tree_label(row: &VisibleRow<'_>) -> String {
    let marker = match (row.expandable, row.expanded) {
        (true, true) => "▾ ",
        (true, false) => "▸ ",
        (false, _) => "  ",
    };
    format!("{}{marker}{}", "  ".repeat(row.depth), row.item.item_number)
}

/// Parse a `KEY=VALUE` column filter argument.
pub fn parse_column_filter(arg: &str) -> Result<(ColumnKey, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))?;
    Ok((key.parse()?, value.to_string()))
}

/// Fixed-width text bar for a percentage.
pub fn percent_bar(percentage: u8, width: usize) -> String {
    let filled = (usize::from(percentage.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
