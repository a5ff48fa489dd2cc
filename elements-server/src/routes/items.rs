//! Item listing, tree and install routes

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use elements_core::{
    flatten, FileTree, FlatNode, InstallCommands, PackageManager, RegistryItem,
};
use serde::{Deserialize, Serialize};

use super::{not_found, ApiError};
use crate::AppState;

/// Catalog entry for one item
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub file_count: usize,
    pub dependencies: Vec<String>,
    pub registry_dependencies: Vec<String>,
    /// Whether `/r/{name}.json` is served for this item
    pub has_manifest: bool,
}

impl ItemSummary {
    fn new(item: &RegistryItem, has_manifest: bool) -> Self {
        Self {
            name: item.name.clone(),
            item_type: item.item_type.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            file_count: item.files.len(),
            dependencies: item.dependencies.clone(),
            registry_dependencies: item.registry_dependencies.clone(),
            has_manifest,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub registry: String,
    pub items: Vec<ItemSummary>,
}

/// Raw node map plus its flattened display view
#[derive(Debug, Serialize)]
pub struct TreeResponse {
    pub name: String,
    pub tree: FileTree,
    pub flattened: Vec<FlatNode>,
}

#[derive(Debug, Deserialize)]
pub struct InstallQuery {
    pub pm: Option<String>,
}

/// `GET /v1/items`
pub async fn list_items(State(state): State<Arc<AppState>>) -> Json<ItemsResponse> {
    let items = state
        .index
        .items
        .iter()
        .map(|item| ItemSummary::new(item, state.manifests.contains_key(&item.name)))
        .collect();

    Json(ItemsResponse {
        registry: state.index.name.clone(),
        items,
    })
}

/// `GET /v1/items/:name/tree`
pub async fn item_tree(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TreeResponse>, ApiError> {
    let item = state.index.get(&name).ok_or_else(|| not_found(&name))?;
    let tree = state.trees.get_or_build_item(item)?;

    Ok(Json(TreeResponse {
        name: item.name.clone(),
        flattened: flatten(&tree),
        tree: FileTree::clone(&tree),
    }))
}

/// `GET /v1/items/:name/install[?pm=…]`
pub async fn install_commands(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<InstallQuery>,
) -> Result<Json<InstallCommands>, ApiError> {
    let item = state.index.get(&name).ok_or_else(|| not_found(&name))?;
    let mut commands = InstallCommands::for_item(&item.name);

    if let Some(pm) = query.pm.as_deref() {
        let pm: PackageManager = pm.parse()?;
        commands.commands.retain(|c| c.package_manager == pm);
    }

    Ok(Json(commands))
}
