mod health;
mod words;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::response::ApiError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/words", get(words::list_words).post(words::create_word))
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    ApiError::not_found("Not found").into_response()
}
