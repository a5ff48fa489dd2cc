//! Endpoint tests driving the router directly with `tower::ServiceExt::oneshot`

use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use elements_server::{AppState, ElementsServer, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;

fn server() -> ElementsServer {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("registry");
    let state = AppState::from_directory(&dir).expect("Failed to load sample registry");
    ElementsServer::new(state, ServerConfig::builder().cors(false).build())
}

async fn get(server: &ElementsServer, uri: &str) -> (StatusCode, Value) {
    let response = server
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&server(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["items"], 5);
}

#[tokio::test]
async fn test_manifest_document() {
    let server = server();

    let (status, body) = get(&server, "/r/theme-switcher.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "theme-switcher");
    assert!(body["files"][0]["content"]
        .as_str()
        .unwrap()
        .contains("useTheme"));

    let (status, body) = get(&server, "/r/registry.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_missing_manifest_is_404() {
    // Listed in the index, but no r/ document ships for it
    let (status, body) = get(&server(), "/r/polar-sponsorship.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "ITEM_NOT_FOUND");
}

#[tokio::test]
async fn test_list_items() {
    let (status, body) = get(&server(), "/v1/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["registry"], "elements");

    let items = body["items"].as_array().unwrap();
    assert_eq!(items[0]["name"], "clerk-sign-in");
    assert_eq!(items[0]["hasManifest"], true);
    assert_eq!(items[1]["name"], "clerk-waitlist");
    assert_eq!(items[1]["hasManifest"], false);
}

#[tokio::test]
async fn test_resolve() {
    let server = server();

    let (status, body) = get(&server, "/v1/resolve?key=sign-in").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "clerk-sign-in");
    assert_eq!(body["tier"], "suffix");

    let (status, body) = get(&server, "/v1/resolve?key=dark-mode").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "theme-switcher");
    assert_eq!(body["tier"], "synonym");

    let (status, _) = get(&server, "/v1/resolve?key=checkout").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resolve_requires_key() {
    let (status, _) = get(&server(), "/v1/resolve").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_item_tree() {
    let server = server();
    let (status, body) = get(&server, "/v1/items/clerk-sign-in/tree").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["tree"]["root"]["type"], "folder");
    assert_eq!(body["tree"]["dependencies"]["name"], "Dependencies");
    assert_eq!(body["flattened"][0]["name"], "components/elements/clerk");
    assert_eq!(body["flattened"][0]["id"], "components");

    // The second request is served from the tree cache
    get(&server, "/v1/items/clerk-sign-in/tree").await;
    let stats = server.state().trees.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn test_item_tree_unknown_item() {
    let (status, body) = get(&server(), "/v1/items/nope/tree").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "ITEM_NOT_FOUND");
}

#[tokio::test]
async fn test_install_commands() {
    let server = server();

    let (status, body) = get(&server, "/v1/items/logos/install").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["commands"].as_array().unwrap().len(), 4);

    let (status, body) = get(&server, "/v1/items/logos/install?pm=pnpm").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["commands"][0]["command"],
        "pnpm dlx shadcn@latest add @elements/logos"
    );

    let (status, body) = get(&server, "/v1/items/logos/install?pm=cargo").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "UNKNOWN_PACKAGE_MANAGER");
}
