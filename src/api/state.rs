//! Application state for shared services

use std::sync::Arc;

use crate::domain::menu::MenuRepository;
use crate::domain::{DomainError, ItemId, MenuCategory, MenuItem, MenuItemDraft};
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::rate_limit::RateLimiter;
use crate::infrastructure::services::MenuService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub dish_service: Arc<dyn MenuServiceTrait>,
    pub drink_service: Arc<dyn MenuServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
    /// `None` when rate limiting is disabled
    pub rate_limiter: Option<Arc<RateLimiter>>,
}

impl AppState {
    /// Service backing the given category
    pub fn menu(&self, category: MenuCategory) -> &Arc<dyn MenuServiceTrait> {
        match category {
            MenuCategory::Dish => &self.dish_service,
            MenuCategory::Drink => &self.drink_service,
        }
    }
}

/// Trait for dish and drink service operations
#[async_trait::async_trait]
pub trait MenuServiceTrait: Send + Sync {
    fn category(&self) -> MenuCategory;
    async fn list(&self) -> Result<Vec<MenuItem>, DomainError>;
    async fn get(&self, id: ItemId) -> Result<MenuItem, DomainError>;
    async fn create(&self, draft: MenuItemDraft) -> Result<MenuItem, DomainError>;
    async fn update(&self, id: ItemId, draft: MenuItemDraft) -> Result<MenuItem, DomainError>;
    async fn delete(&self, id: ItemId) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R: MenuRepository + 'static> MenuServiceTrait for MenuService<R> {
    fn category(&self) -> MenuCategory {
        MenuService::category(self)
    }

    async fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        MenuService::list(self).await
    }

    async fn get(&self, id: ItemId) -> Result<MenuItem, DomainError> {
        MenuService::get(self, id).await
    }

    async fn create(&self, draft: MenuItemDraft) -> Result<MenuItem, DomainError> {
        MenuService::create(self, draft).await
    }

    async fn update(&self, id: ItemId, draft: MenuItemDraft) -> Result<MenuItem, DomainError> {
        MenuService::update(self, id, draft).await
    }

    async fn delete(&self, id: ItemId) -> Result<(), DomainError> {
        MenuService::delete(self, id).await
    }
}
