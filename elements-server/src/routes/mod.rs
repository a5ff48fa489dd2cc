//! HTTP route handlers

mod items;
mod registry;
mod resolve;

pub use items::{ItemSummary, ItemsResponse, TreeResponse};
pub use resolve::ResolveResponse;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use elements_core::ElementsError;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub items: usize,
}

/// Core error rendered as its JSON error response
#[derive(Debug)]
pub struct ApiError(pub ElementsError);

impl From<ElementsError> for ApiError {
    fn from(err: ElementsError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("{}", self.0);
        }
        (status, Json(self.0.to_error_response())).into_response()
    }
}

pub(crate) fn not_found(name: &str) -> ApiError {
    ApiError(ElementsError::ItemNotFound {
        name: name.to_string(),
    })
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        items: state.index.len(),
    })
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/r/:file", get(registry::get_document))
        .route("/v1/items", get(items::list_items))
        .route("/v1/items/:name/tree", get(items::item_tree))
        .route("/v1/items/:name/install", get(items::install_commands))
        .route("/v1/resolve", get(resolve::resolve))
        .with_state(state)
}
