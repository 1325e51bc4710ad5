//! Menu item validation

use thiserror::Error;

use super::entity::MenuItemDraft;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_IMAGE_URL_LENGTH: usize = 2083;

/// Errors that can occur during menu item validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MenuItemValidationError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("description cannot exceed {0} characters")]
    DescriptionTooLong(usize),

    #[error("image URL cannot exceed {0} characters")]
    ImageUrlTooLong(usize),
}

/// Validate the mutable fields of a dish or drink
pub fn validate_draft(draft: &MenuItemDraft) -> Result<(), MenuItemValidationError> {
    if draft.name.trim().is_empty() {
        return Err(MenuItemValidationError::EmptyName);
    }

    if draft.name.chars().count() > MAX_NAME_LENGTH {
        return Err(MenuItemValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    if draft.description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(MenuItemValidationError::DescriptionTooLong(
            MAX_DESCRIPTION_LENGTH,
        ));
    }

    if draft.image_url.chars().count() > MAX_IMAGE_URL_LENGTH {
        return Err(MenuItemValidationError::ImageUrlTooLong(MAX_IMAGE_URL_LENGTH));
    }

    Ok(())
}
