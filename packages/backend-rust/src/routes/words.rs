use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::response::ApiError;
use crate::services;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateWordRequest {
    italian_word: Option<String>,
    english_word: Option<String>,
}

pub async fn list_words(State(state): State<AppState>) -> Response {
    let Some(store) = state.store() else {
        return ApiError::service_unavailable("Service unavailable").into_response();
    };

    match services::words::get_all_words(store.as_ref()).await {
        Ok(words) => Json(words).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "words list query failed");
            ApiError::internal("Unexpected error").into_response()
        }
    }
}

pub async fn create_word(State(state): State<AppState>, body: Bytes) -> Response {
    // The body is read manually so a malformed payload gets the same 400
    // shape as one with missing fields.
    let payload: CreateWordRequest = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(_) => {
            return ApiError::bad_request("Both words are required").into_response();
        }
    };

    let italian = payload.italian_word.as_deref().unwrap_or("");
    let english = payload.english_word.as_deref().unwrap_or("");
    if italian.is_empty() || english.is_empty() {
        return ApiError::bad_request("Both words are required").into_response();
    }

    let Some(store) = state.store() else {
        return ApiError::service_unavailable("Service unavailable").into_response();
    };

    match services::words::add_word(store.as_ref(), italian, english).await {
        Ok(word) => (StatusCode::CREATED, Json(word)).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "word insert failed");
            ApiError::internal("Unexpected error").into_response()
        }
    }
}
