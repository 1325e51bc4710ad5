//! Domain layer - Core business logic and entities

pub mod cache;
pub mod error;
pub mod menu;

pub use cache::{Cache, CacheExt};
pub use error::DomainError;
pub use menu::{
    validate_draft, Amount, AmountError, ItemId, MenuCategory, MenuItem, MenuItemDraft,
    MenuItemValidationError, MenuRepository,
};
