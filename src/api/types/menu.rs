//! Request and response bodies for dishes and drinks

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, MenuItem, MenuItemDraft};

/// Body of create and update requests
///
/// An `id` field is accepted and ignored; identifiers come from the store
/// on create and from the path on update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Amount,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating: Option<Amount>,
}

impl From<MenuItemRequest> for MenuItemDraft {
    fn from(request: MenuItemRequest) -> Self {
        MenuItemDraft {
            name: request.name,
            description: request.description.unwrap_or_default(),
            price: request.price,
            image_url: request.image_url.unwrap_or_default(),
            rating: request.rating,
        }
    }
}

/// A dish or drink as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Amount,
    pub image_url: String,
    pub rating: Option<Amount>,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id().value(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            price: item.price(),
            image_url: item.image_url().to_string(),
            rating: item.rating(),
        }
    }
}
