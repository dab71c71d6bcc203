use serde::{Deserialize, Serialize};

use bengkel_inventory::{InventoryItem, format_currency, format_date};

// -------------------------
// Request DTOs
// -------------------------

/// `GET /inventory/items/search?type=..&term=..`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "type", default)]
    pub search_type: String,
    #[serde(default)]
    pub term: String,
}

// -------------------------
// Response DTOs
// -------------------------

/// An item as rendered to clients: the normalized item plus display strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub price_display: String,
    pub created_at_display: String,
}

impl From<InventoryItem> for ItemView {
    fn from(item: InventoryItem) -> Self {
        Self {
            price_display: format_currency(item.price),
            created_at_display: format_date(&item.created_at),
            item,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemView>,
    pub count: usize,
}

impl From<Vec<InventoryItem>> for ItemListResponse {
    fn from(items: Vec<InventoryItem>) -> Self {
        let items: Vec<ItemView> = items.into_iter().map(ItemView::from).collect();
        Self {
            count: items.len(),
            items,
        }
    }
}
