//! Free-text item lookup.

use bom_model::Item;

/// Case-insensitive substring match on item number, description and
/// commodity. A blank query matches nothing.
pub fn search<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .filter(|item| {
            [
                Some(item.item_number.as_str()),
                item.description.as_deref(),
                item.commodity.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
