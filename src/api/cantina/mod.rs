//! Cantina menu endpoints for dishes and drinks

pub mod items;

use axum::{middleware, routing::get, Router};

use super::middleware::{jwt_auth_middleware, rate_limit_middleware};
use super::state::AppState;
use items::{Dishes, Drinks, MenuSection};

/// Path prefix of every menu route
pub const CANTINA_PREFIX: &str = "/api/cantina";

/// Create the cantina router: authenticated, then rate limited
pub fn create_cantina_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(section_routes::<Dishes>())
        .merge(section_routes::<Drinks>())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}

fn section_routes<S: MenuSection>() -> Router<AppState> {
    let collection = format!("/{}", S::CATEGORY.collection());

    Router::new()
        .route(
            &collection,
            get(items::list_items::<S>).post(items::create_item::<S>),
        )
        .route(
            &format!("{}/", collection),
            get(items::list_items::<S>).post(items::create_item::<S>),
        )
        .route(
            &format!("{}/{{id}}", collection),
            get(items::get_item::<S>)
                .put(items::update_item::<S>)
                .delete(items::delete_item::<S>),
        )
}
