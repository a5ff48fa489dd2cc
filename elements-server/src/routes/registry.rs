//! Registry documents as `shadcn add` fetches them

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use elements_core::registry::INDEX_FILE;

use super::{not_found, ApiError};
use crate::AppState;

/// `GET /r/:file`, where `file` is `{name}.json` or `registry.json`
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    if file == INDEX_FILE {
        return Ok(Json(state.index.clone()).into_response());
    }

    let name = file.strip_suffix(".json").unwrap_or(&file);
    match state.manifests.get(name) {
        Some(manifest) => Ok(Json(manifest.clone()).into_response()),
        None => {
            tracing::debug!("No manifest for {:?}", name);
            Err(not_found(name))
        }
    }
}
