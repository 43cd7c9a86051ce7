use crate::types::{Item, ItemId};

/// Canonical discussion page for an item.
pub fn discussion_url(discussion_base: &str, id: ItemId) -> String {
    format!("{}?id={}", discussion_base, id)
}

/// Fill a missing or empty `url` with the item's discussion page. Nothing else changes.
pub fn normalize_item(mut item: Item, discussion_base: &str) -> Item {
    let missing = item.url.as_deref().map_or(true, str::is_empty);
    if missing {
        item.url = Some(discussion_url(discussion_base, item.id));
    }
    item
}

pub fn normalize_items(items: Vec<Item>, discussion_base: &str) -> Vec<Item> {
    items
        .into_iter()
        .map(|item| normalize_item(item, discussion_base))
        .collect()
}
