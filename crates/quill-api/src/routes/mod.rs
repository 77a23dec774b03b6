pub mod health;
pub mod login;

use axum::Router;

use crate::state::AppState;

pub fn frontend_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(login::routes(state.clone()))
        .merge(health::routes(state))
}
