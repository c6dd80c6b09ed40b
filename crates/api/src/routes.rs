use crate::handlers;
use crate::middleware::require_bearer_token;
use crate::state::AppState;
use axum::{middleware, Router};

/// Management API, meant to be nested under `/api`.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .merge(handlers::records::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_token,
        ))
        .with_state(state)
}
