// Shared fixtures for the route suites. Every suite drives the full
// router (green gate included) against a seeded in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use green_gateway::database::models::{Account, Application, Namespace};
use green_gateway::database::MemoryStore;
use green_gateway::routes;
use green_gateway::state::AppState;
use green_gateway::util::password;
use serde_json::{Map, Value};
use tower::util::ServiceExt;

pub const APPLICATION_KEY: &str = "portal";
pub const APPLICATION_SECRET: &str = "green-secret";
pub const NAMESPACE: &str = "portal.phosphorus";

/// Store pre-loaded with a green-capable application and one namespace.
pub fn seeded_store() -> (Arc<MemoryStore>, Namespace) {
    let store = Arc::new(MemoryStore::new());
    store.seed_application(Application::new(
        APPLICATION_KEY.to_string(),
        "Portal".to_string(),
        APPLICATION_SECRET.to_string(),
        "portal-public-key".to_string(),
    ));
    let namespace = Namespace::new(NAMESPACE.to_string());
    store.seed_namespace(namespace.clone());
    (store, namespace)
}

pub fn router(store: Arc<MemoryStore>) -> Router {
    routes::app(AppState::new(store))
}

pub fn credential() -> String {
    format!("Bearer {}:{}", APPLICATION_KEY, APPLICATION_SECRET)
}

/// An active, non-limbo account ready for seeding.
pub fn plain_account(username: &str, namespace: &Namespace) -> Account {
    Account::create_with_password(
        username.to_string(),
        namespace.id,
        password::digest_password("opening-password"),
        Map::new(),
    )
}

pub async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("Authorization", credential())
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    split(app.clone().oneshot(request).await.unwrap()).await
}

pub async fn post_empty(app: &Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("Authorization", credential())
        .body(Body::empty())
        .unwrap();
    split(app.clone().oneshot(request).await.unwrap()).await
}

pub async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(path)
        .header("Authorization", credential())
        .body(Body::empty())
        .unwrap();
    split(app.clone().oneshot(request).await.unwrap()).await
}

pub async fn get_with_auth(app: &Router, path: &str, auth: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(path);
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }
    let request = builder.body(Body::empty()).unwrap();
    split(app.clone().oneshot(request).await.unwrap()).await
}

async fn split(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Assert the uniform failure payload; panics carry the offending body.
pub fn assert_refused(status: StatusCode, body: &Value, code: u16) {
    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
    assert_eq!(body["status"], 400, "body: {body}");
    assert_eq!(body["code"], code, "body: {body}");
}
