//! Menu item entity and related types

use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Store-assigned identifier of a menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// The mutable fields of a menu item, as supplied on create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Amount,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub rating: Option<Amount>,
}

impl MenuItemDraft {
    pub fn new(name: impl Into<String>, price: Amount) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            image_url: String::new(),
            rating: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_rating(mut self, rating: Amount) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// A persisted dish or drink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    id: ItemId,
    name: String,
    description: String,
    price: Amount,
    image_url: String,
    rating: Option<Amount>,
}

impl MenuItem {
    /// Attach a store-assigned identifier to a draft
    pub fn new(id: ItemId, draft: MenuItemDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
            rating: draft.rating,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Amount {
        self.price
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn rating(&self) -> Option<Amount> {
        self.rating
    }

    /// Case-insensitive name comparison used for uniqueness checks
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Full replacement of the mutable fields; the identifier never changes
    pub fn replace(&mut self, draft: MenuItemDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.image_url = draft.image_url;
        self.rating = draft.rating;
    }
}
