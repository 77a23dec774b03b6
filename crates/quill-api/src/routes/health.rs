use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct Health {
    ok: bool,
    api_base: String,
}

pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new().route("/healthz", get(get_health))
}

async fn get_health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        ok: true,
        api_base: state.api_base.0.clone(),
    })
}
