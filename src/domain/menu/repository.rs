//! Menu repository trait

use async_trait::async_trait;

use super::entity::{ItemId, MenuItem, MenuItemDraft};
use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Persistence gateway for one menu collection
///
/// Name uniqueness violations surface as `DomainError::Conflict`, a missing
/// identifier on `update`/`delete` as `DomainError::NotFound`, anything else
/// as `DomainError::Storage`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Lists every item of the collection, ordered by id
    async fn list(&self) -> Result<Vec<MenuItem>, DomainError>;

    /// Finds an item by id
    async fn get(&self, id: ItemId) -> Result<Option<MenuItem>, DomainError>;

    /// Inserts a new item and returns it with its assigned id
    async fn create(&self, draft: MenuItemDraft) -> Result<MenuItem, DomainError>;

    /// Replaces the mutable fields of an existing item
    async fn update(&self, item: MenuItem) -> Result<MenuItem, DomainError>;

    /// Removes an item
    async fn delete(&self, id: ItemId) -> Result<(), DomainError>;
}
