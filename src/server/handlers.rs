use super::types::{ChatRequestBody, ErrorResponse, HealthResponse};
use crate::{
    Error,
    catalog::{Product, ProductService},
    chat::{ChatHistory, ChatRequest, ChatResponse, ChatService},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService>,
    pub chat: Arc<ChatService>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(e: Error) -> ApiError {
    let status = if !e.is_client_error() {
        error!("Request failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    } else if matches!(e, Error::ProductNotFound { .. }) {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    state
        .products
        .list_products()
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    state
        .products
        .get_product(product_id)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequestBody>,
) -> Result<Json<ChatResponse>, ApiError> {
    // Generate session ID if not provided
    let session_id = body
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    info!("Received chat message for session: {}", session_id);

    state
        .chat
        .process_message(ChatRequest {
            session_id,
            message: body.message,
        })
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn chat_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ChatHistory>, ApiError> {
    state
        .chat
        .get_history(&session_id)
        .await
        .map(Json)
        .map_err(error_response)
}
