//! In-memory menu repository

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::menu::{ItemId, MenuCategory, MenuItem, MenuItemDraft, MenuRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Collection {
    items: BTreeMap<ItemId, MenuItem>,
    last_id: i64,
}

impl Collection {
    fn name_taken(&self, name: &str, except: Option<ItemId>) -> bool {
        self.items
            .values()
            .any(|item| Some(item.id()) != except && item.has_name(name))
    }
}

/// Thread-safe in-memory repository for one menu collection
///
/// Useful for testing and development. Data is lost when the process terminates.
/// Ids come from a monotonically increasing sequence and are never reused.
#[derive(Debug)]
pub struct InMemoryMenuRepository {
    category: MenuCategory,
    collection: RwLock<Collection>,
}

impl InMemoryMenuRepository {
    /// Creates a new empty repository
    pub fn new(category: MenuCategory) -> Self {
        Self {
            category,
            collection: RwLock::new(Collection::default()),
        }
    }

    /// Creates a repository pre-populated with the given drafts, ids assigned in order
    pub fn with_items(category: MenuCategory, drafts: Vec<MenuItemDraft>) -> Self {
        let repository = Self::new(category);

        if let Ok(mut collection) = repository.collection.write() {
            for draft in drafts {
                collection.last_id += 1;
                let id = ItemId::new(collection.last_id);
                collection.items.insert(id, MenuItem::new(id, draft));
            }
        }

        repository
    }

    pub fn category(&self) -> MenuCategory {
        self.category
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        let collection = self.collection.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(collection.items.values().cloned().collect())
    }

    async fn get(&self, id: ItemId) -> Result<Option<MenuItem>, DomainError> {
        let collection = self.collection.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(collection.items.get(&id).cloned())
    }

    async fn create(&self, draft: MenuItemDraft) -> Result<MenuItem, DomainError> {
        let mut collection = self.collection.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if collection.name_taken(&draft.name, None) {
            return Err(DomainError::conflict(
                self.category.duplicate_name_message(&draft.name),
            ));
        }

        collection.last_id += 1;
        let id = ItemId::new(collection.last_id);
        let item = MenuItem::new(id, draft);
        collection.items.insert(id, item.clone());

        Ok(item)
    }

    async fn update(&self, item: MenuItem) -> Result<MenuItem, DomainError> {
        let mut collection = self.collection.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if !collection.items.contains_key(&item.id()) {
            return Err(DomainError::not_found(
                self.category.not_found_message(item.id()),
            ));
        }

        if collection.name_taken(item.name(), Some(item.id())) {
            return Err(DomainError::conflict(
                self.category.duplicate_name_message(item.name()),
            ));
        }

        collection.items.insert(item.id(), item.clone());
        Ok(item)
    }

    async fn delete(&self, id: ItemId) -> Result<(), DomainError> {
        let mut collection = self.collection.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match collection.items.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(self.category.not_found_message(id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu::Amount;

    fn draft(name: &str, hundredths: i64) -> MenuItemDraft {
        MenuItemDraft::new(name, Amount::from_hundredths(hundredths))
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryMenuRepository::new(MenuCategory::Dish);

        let first = repo.create(draft("Bantha Burger", 1250)).await.unwrap();
        let second = repo.create(draft("Womp Rat Skewer", 700)).await.unwrap();

        assert_eq!(first.id(), ItemId::new(1));
        assert_eq!(second.id(), ItemId::new(2));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let repo = InMemoryMenuRepository::new(MenuCategory::Dish);

        let first = repo.create(draft("Bantha Burger", 1250)).await.unwrap();
        repo.delete(first.id()).await.unwrap();
        let second = repo.create(draft("Bantha Burger", 1250)).await.unwrap();

        assert_eq!(second.id(), ItemId::new(2));
    }

    #[tokio::test]
    async fn test_get() {
        let repo = InMemoryMenuRepository::new(MenuCategory::Drink);
        let created = repo.create(draft("Blue Milk", 350)).await.unwrap();

        let fetched = repo.get(created.id()).await.unwrap();
        assert_eq!(fetched, Some(created));

        assert!(repo.get(ItemId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryMenuRepository::with_items(
            MenuCategory::Drink,
            vec![draft("Jawa Juice", 400), draft("Blue Milk", 350)],
        );

        let items = repo.list().await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name()).collect();

        assert_eq!(names, vec!["Jawa Juice", "Blue Milk"]);
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let repo = InMemoryMenuRepository::new(MenuCategory::Dish);
        repo.create(draft("Bantha Burger", 1250)).await.unwrap();

        let result = repo.create(draft("BANTHA burger", 900)).await;

        match result {
            Err(DomainError::Conflict { message }) => {
                assert_eq!(
                    message,
                    "A dish with the name 'BANTHA burger' already exists."
                );
            }
            other => panic!("Expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update() {
        let repo = InMemoryMenuRepository::new(MenuCategory::Dish);
        let mut item = repo.create(draft("Bantha Burger", 1250)).await.unwrap();

        item.replace(draft("Bantha Burger", 1400));
        repo.update(item.clone()).await.unwrap();

        let fetched = repo.get(item.id()).await.unwrap().unwrap();
        assert_eq!(fetched.price(), Amount::from_hundredths(1400));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryMenuRepository::new(MenuCategory::Dish);
        let item = MenuItem::new(ItemId::new(5), draft("Bantha Burger", 1250));

        let result = repo.update(item).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_to_other_items_name() {
        let repo = InMemoryMenuRepository::new(MenuCategory::Dish);
        repo.create(draft("Bantha Burger", 1250)).await.unwrap();
        let mut second = repo.create(draft("Womp Rat Skewer", 700)).await.unwrap();

        second.replace(draft("bantha burger", 700));
        let result = repo.update(second).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryMenuRepository::new(MenuCategory::Dish);
        let item = repo.create(draft("Bantha Burger", 1250)).await.unwrap();

        repo.delete(item.id()).await.unwrap();
        assert!(repo.get(item.id()).await.unwrap().is_none());

        let result = repo.delete(item.id()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let dishes = InMemoryMenuRepository::new(MenuCategory::Dish);
        let drinks = InMemoryMenuRepository::new(MenuCategory::Drink);

        dishes.create(draft("Cantina Special", 900)).await.unwrap();
        let drink = drinks.create(draft("Cantina Special", 500)).await.unwrap();

        assert_eq!(drink.id(), ItemId::new(1));
        assert_eq!(drinks.category(), MenuCategory::Drink);
    }
}
