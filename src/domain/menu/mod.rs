//! Menu domain module
//!
//! Dishes and drinks share one shape (`MenuItem`) and live in separate
//! collections distinguished by `MenuCategory`.

mod amount;
mod category;
mod entity;
mod repository;
mod validation;

pub use amount::{Amount, AmountError};
pub use category::MenuCategory;
pub use entity::{ItemId, MenuItem, MenuItemDraft};
pub use repository::MenuRepository;
pub use validation::{
    validate_draft, MenuItemValidationError, MAX_DESCRIPTION_LENGTH, MAX_IMAGE_URL_LENGTH,
    MAX_NAME_LENGTH,
};

#[cfg(test)]
pub use repository::MockMenuRepository;
