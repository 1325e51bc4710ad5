//! Menu categories and their naming conventions

use super::entity::ItemId;

/// The two independent menu collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCategory {
    Dish,
    Drink,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 2] = [MenuCategory::Dish, MenuCategory::Drink];

    /// Singular display name ("Dish")
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Dish => "Dish",
            Self::Drink => "Drink",
        }
    }

    /// Plural display name ("Dishes")
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Dish => "Dishes",
            Self::Drink => "Drinks",
        }
    }

    /// Table name and URL segment ("dishes")
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Dish => "dishes",
            Self::Drink => "drinks",
        }
    }

    /// Cache key holding the full listing of this category
    pub fn listing_cache_key(&self) -> &'static str {
        self.plural()
    }

    /// Cache key holding a single item of this category
    pub fn item_cache_key(&self, id: ItemId) -> String {
        format!("{}_{}", self.singular(), id)
    }

    pub fn not_found_message(&self, id: ItemId) -> String {
        format!("{} with ID '{}' not found.", self.singular(), id)
    }

    pub fn missing_body_message(&self) -> String {
        format!("{} cannot be null.", self.singular())
    }

    pub fn duplicate_name_message(&self, name: &str) -> String {
        format!(
            "A {} with the name '{}' already exists.",
            self.singular().to_lowercase(),
            name
        )
    }
}

impl std::fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.collection())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_keys() {
        assert_eq!(MenuCategory::Dish.listing_cache_key(), "Dishes");
        assert_eq!(MenuCategory::Drink.listing_cache_key(), "Drinks");
        assert_eq!(MenuCategory::Dish.item_cache_key(ItemId::new(7)), "Dish_7");
        assert_eq!(MenuCategory::Drink.item_cache_key(ItemId::new(12)), "Drink_12");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            MenuCategory::Drink.not_found_message(ItemId::new(3)),
            "Drink with ID '3' not found."
        );
        assert_eq!(
            MenuCategory::Dish.missing_body_message(),
            "Dish cannot be null."
        );
        assert_eq!(
            MenuCategory::Dish.duplicate_name_message("Bantha Burger"),
            "A dish with the name 'Bantha Burger' already exists."
        );
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(MenuCategory::Dish.to_string(), "dishes");
        assert_eq!(MenuCategory::Drink.collection(), "drinks");
    }
}
