use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};

use crate::state::AppState;

/// Identity entry point on the remote API.
pub const GOOGLE_LOGIN_PATH: &str = "/auth/google";

pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new().route("/login", get(handle_login))
}

/// Hands the browser to the remote API, which runs the Google flow and
/// comes back through `/auth/callback?token=…`.
async fn handle_login(State(state): State<AppState>) -> Response {
    let target = state.api_url(GOOGLE_LOGIN_PATH);
    tracing::debug!("redirecting login to {target}");
    Redirect::to(&target).into_response()
}
