//! Request, response and error types of the HTTP API

pub mod error;
pub mod json;
pub mod menu;
pub mod path;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use menu::{MenuItemRequest, MenuItemResponse};
pub use path::ItemIdPath;
