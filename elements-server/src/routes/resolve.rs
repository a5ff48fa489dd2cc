//! Key resolution route

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use elements_core::MatchTier;
use serde::{Deserialize, Serialize};

use super::{not_found, ApiError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub key: String,
}

/// The item a key resolved to
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub key: String,
    pub name: String,
    pub tier: MatchTier,
}

/// `GET /v1/resolve?key=…`
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let found = state
        .index
        .resolve_with_tier(&query.key)
        .ok_or_else(|| not_found(&query.key))?;

    tracing::debug!("Resolved {:?} to {} ({})", query.key, found.item.name, found.tier);

    Ok(Json(ResolveResponse {
        name: found.item.name.clone(),
        tier: found.tier,
        key: query.key,
    }))
}
