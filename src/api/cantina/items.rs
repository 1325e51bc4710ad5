//! Handlers shared by the dish and drink collections

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use tracing::{debug, info};

use super::CANTINA_PREFIX;
use crate::api::middleware::Authenticated;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ItemIdPath, Json, MenuItemRequest, MenuItemResponse};
use crate::domain::{MenuCategory, MenuItemDraft};

/// A menu collection served under its own path segment
pub trait MenuSection: Send + Sync + 'static {
    const CATEGORY: MenuCategory;
}

/// `/api/cantina/dishes`
pub struct Dishes;

impl MenuSection for Dishes {
    const CATEGORY: MenuCategory = MenuCategory::Dish;
}

/// `/api/cantina/drinks`
pub struct Drinks;

impl MenuSection for Drinks {
    const CATEGORY: MenuCategory = MenuCategory::Drink;
}

pub async fn list_items<S: MenuSection>(
    State(state): State<AppState>,
) -> Result<Json<Vec<MenuItemResponse>>, ApiError> {
    debug!(collection = %S::CATEGORY, "Listing menu items");

    let items = state.menu(S::CATEGORY).list().await?;

    Ok(Json(items.into_iter().map(MenuItemResponse::from).collect()))
}

pub async fn get_item<S: MenuSection>(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> Result<Json<MenuItemResponse>, ApiError> {
    debug!(collection = %S::CATEGORY, id = %id, "Getting menu item");

    let item = state.menu(S::CATEGORY).get(id).await?;

    Ok(Json(MenuItemResponse::from(item)))
}

/// Create an item; responds 201 with its location
pub async fn create_item<S: MenuSection>(
    State(state): State<AppState>,
    Authenticated(claims): Authenticated,
    Json(request): Json<Option<MenuItemRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = require_body(S::CATEGORY, request)?;

    info!(
        collection = %S::CATEGORY,
        subject = %claims.subject(),
        name = %draft.name,
        "Creating menu item"
    );

    let item = state.menu(S::CATEGORY).create(draft).await?;
    let location = item_location(S::CATEGORY, item.id().value());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(MenuItemResponse::from(item)),
    ))
}

/// Replace every mutable field of an item
pub async fn update_item<S: MenuSection>(
    State(state): State<AppState>,
    Authenticated(claims): Authenticated,
    ItemIdPath(id): ItemIdPath,
    Json(request): Json<Option<MenuItemRequest>>,
) -> Result<StatusCode, ApiError> {
    let draft = require_body(S::CATEGORY, request)?;

    info!(
        collection = %S::CATEGORY,
        subject = %claims.subject(),
        id = %id,
        "Updating menu item"
    );

    state.menu(S::CATEGORY).update(id, draft).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_item<S: MenuSection>(
    State(state): State<AppState>,
    Authenticated(claims): Authenticated,
    ItemIdPath(id): ItemIdPath,
) -> Result<StatusCode, ApiError> {
    info!(
        collection = %S::CATEGORY,
        subject = %claims.subject(),
        id = %id,
        "Deleting menu item"
    );

    state.menu(S::CATEGORY).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn require_body(
    category: MenuCategory,
    request: Option<MenuItemRequest>,
) -> Result<MenuItemDraft, ApiError> {
    request
        .map(MenuItemDraft::from)
        .ok_or_else(|| ApiError::bad_request(category.missing_body_message()))
}

fn item_location(category: MenuCategory, id: i64) -> String {
    format!("{}/{}/{}", CANTINA_PREFIX, category.collection(), id)
}
