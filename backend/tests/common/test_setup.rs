use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use backend::{dispatcher::Dispatcher, server};
use http::Method;
use tower::ServiceExt;

use super::fakes::{FakeSigner, InMemoryPropertyStore};

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Router wired to in-memory collaborators
pub struct TestContext {
    pub router: Router,
    pub signer: Arc<FakeSigner>,
    pub store: Arc<InMemoryPropertyStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with(FakeSigner::default(), InMemoryPropertyStore::default())
    }

    pub fn with(signer: FakeSigner, store: InMemoryPropertyStore) -> Self {
        setup_test_env();

        let signer = Arc::new(signer);
        let store = Arc::new(store);
        let dispatcher = Arc::new(Dispatcher::new(signer.clone(), store.clone()));

        Self {
            router: server::router(dispatcher),
            signer,
            store,
        }
    }

    pub async fn send_request(&self, method: Method, route: &str, body: Option<&str>) -> Response {
        let request = Request::builder()
            .uri(route)
            .method(method)
            .header("Content-Type", "application/json")
            .body(body.map_or_else(Body::empty, |body| Body::from(body.to_string())))
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    pub async fn send_post_request(&self, route: &str, payload: serde_json::Value) -> Response {
        self.send_request(Method::POST, route, Some(&payload.to_string()))
            .await
    }
}
