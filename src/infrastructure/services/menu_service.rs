//! Menu service - cached CRUD operations for dishes and drinks

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::cache::{Cache, CacheExt};
use crate::domain::menu::{
    validate_draft, ItemId, MenuCategory, MenuItem, MenuItemDraft, MenuRepository,
};
use crate::domain::DomainError;

/// Application service for one menu collection
///
/// Reads go through the lookaside cache: the listing lives under the plural
/// key (`Dishes`) and single items under `Dish_{id}`. Writes always consult
/// the repository, never the cache, and evict the affected keys afterwards.
///
/// A cache miss holds `write_lock` shared while it fetches and fills, writes
/// hold it exclusively until their eviction is done, so a fill never stores
/// data that a concurrent write has already replaced or removed.
pub struct MenuService<R: MenuRepository> {
    category: MenuCategory,
    repository: Arc<R>,
    cache: Arc<dyn Cache>,
    /// Serializes writes with each other and with cache fills
    write_lock: RwLock<()>,
}

impl<R: MenuRepository> fmt::Debug for MenuService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuService")
            .field("category", &self.category)
            .field("cache", &self.cache)
            .finish()
    }
}

impl<R: MenuRepository> MenuService<R> {
    /// Create a new MenuService with the given repository and cache
    pub fn new(category: MenuCategory, repository: Arc<R>, cache: Arc<dyn Cache>) -> Self {
        Self {
            category,
            repository,
            cache,
            write_lock: RwLock::new(()),
        }
    }

    pub fn category(&self) -> MenuCategory {
        self.category
    }

    /// List all items, ordered by id
    pub async fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        let key = self.category.listing_cache_key();

        let cached: Option<Vec<MenuItem>> = self.cache.get(key).await?;

        if let Some(items) = cached {
            debug!(key, "Cache hit");
            return Ok(items);
        }

        debug!(key, "Cache miss");
        let _fill = self.write_lock.read().await;
        let items = self.repository.list().await?;
        self.cache.set(key, &items).await?;

        Ok(items)
    }

    /// Get an item by id, returning NotFound if it does not exist
    pub async fn get(&self, id: ItemId) -> Result<MenuItem, DomainError> {
        let key = self.category.item_cache_key(id);

        let cached: Option<MenuItem> = self.cache.get(&key).await?;

        if let Some(item) = cached {
            debug!(key = %key, "Cache hit");
            return Ok(item);
        }

        debug!(key = %key, "Cache miss");
        let _fill = self.write_lock.read().await;
        let item = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(self.category.not_found_message(id)))?;

        self.cache.set(&key, &item).await?;

        Ok(item)
    }

    /// Create a new item with a unique name
    pub async fn create(&self, draft: MenuItemDraft) -> Result<MenuItem, DomainError> {
        self.validate(&draft)?;

        let _guard = self.write_lock.write().await;

        let existing = self.repository.list().await?;

        if existing.iter().any(|item| item.has_name(&draft.name)) {
            return Err(DomainError::conflict(
                self.category.duplicate_name_message(&draft.name),
            ));
        }

        let item = self.repository.create(draft).await?;
        self.cache.delete(self.category.listing_cache_key()).await?;

        info!(
            category = %self.category,
            id = %item.id(),
            name = %item.name(),
            "Created menu item"
        );

        Ok(item)
    }

    /// Replace the mutable fields of an existing item
    pub async fn update(&self, id: ItemId, draft: MenuItemDraft) -> Result<MenuItem, DomainError> {
        self.validate(&draft)?;

        let _guard = self.write_lock.write().await;

        let mut item = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(self.category.not_found_message(id)))?;

        let existing = self.repository.list().await?;

        if existing
            .iter()
            .any(|other| other.id() != id && other.has_name(&draft.name))
        {
            return Err(DomainError::conflict(
                self.category.duplicate_name_message(&draft.name),
            ));
        }

        item.replace(draft);
        let item = self.repository.update(item).await?;
        self.evict(id).await?;

        info!(
            category = %self.category,
            id = %id,
            name = %item.name(),
            "Updated menu item"
        );

        Ok(item)
    }

    /// Delete an item
    pub async fn delete(&self, id: ItemId) -> Result<(), DomainError> {
        let _guard = self.write_lock.write().await;

        if self.repository.get(id).await?.is_none() {
            return Err(DomainError::not_found(self.category.not_found_message(id)));
        }

        self.repository.delete(id).await?;
        self.evict(id).await?;

        info!(category = %self.category, id = %id, "Deleted menu item");

        Ok(())
    }

    fn validate(&self, draft: &MenuItemDraft) -> Result<(), DomainError> {
        validate_draft(draft).map_err(|e| {
            DomainError::validation(format!("{} {}.", self.category.singular(), e))
        })
    }

    async fn evict(&self, id: ItemId) -> Result<(), DomainError> {
        let item_key = self.category.item_cache_key(id);
        let keys = [self.category.listing_cache_key(), item_key.as_str()];
        self.cache.delete_many(&keys).await?;
        Ok(())
    }
}
