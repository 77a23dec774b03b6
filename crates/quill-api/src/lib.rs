#![allow(non_snake_case)]

pub mod config;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Routes the frontend server answers itself, next to the Leptos pages.
pub fn frontend_router(state: AppState) -> Router {
    let frontendRoutes = routes::frontend_routes(state.clone());

    Router::new().merge(frontendRoutes).with_state(state)
}
