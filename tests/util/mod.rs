//! Test utilities for building the application state and driving the router.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use serde::de::DeserializeOwned;
use starling::server::{
    model::app::{AppState, AuthSettings},
    router,
    service::auth::admin::AdminAuthorizer,
    store::KeyValueStore,
};
use starling_test_utils::{
    constant::{TEST_ADMIN_USER_ID, TEST_BOT_TOKEN},
    TestContext,
};
use tower::ServiceExt;

pub static TEST_WEBHOOK_SECRET: &str = "test-webhook-secret";

/// Extension trait for TestContext to create the application state
pub trait TestContextExt {
    /// State with an in-memory store, [`TEST_ADMIN_USER_ID`] as administrator and no
    /// webhook secret.
    fn to_app_state(&self) -> AppState;

    /// Same as [`Self::to_app_state`] but requiring [`TEST_WEBHOOK_SECRET`] on webhooks.
    fn to_app_state_with_webhook_secret(&self) -> AppState;

    /// Router over [`Self::to_app_state`].
    fn router(&self) -> Router;
}

impl TestContextExt for TestContext {
    fn to_app_state(&self) -> AppState {
        build_app_state(self, None)
    }

    fn to_app_state_with_webhook_secret(&self) -> AppState {
        build_app_state(self, Some(TEST_WEBHOOK_SECRET.to_string()))
    }

    fn router(&self) -> Router {
        router::routes().with_state(self.to_app_state())
    }
}

fn build_app_state(test: &TestContext, webhook_secret: Option<String>) -> AppState {
    AppState {
        db: test.db.clone(),
        telegram_client: test.telegram_client.clone(),
        store: KeyValueStore::memory(),
        auth: Arc::new(AuthSettings {
            bot_token: TEST_BOT_TOKEN.to_string(),
            session_ttl: Duration::from_secs(3600),
            init_data_max_age: Duration::from_secs(3600),
            admin: AdminAuthorizer::new(Some(&TEST_ADMIN_USER_ID.to_string())),
            webhook_secret,
        }),
    }
}

/// Send a single request through `router`.
pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

/// Decode a JSON response body.
pub async fn body_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `Authorization: tma <init data>` request without a body.
pub fn tma_request(method: &str, uri: &str, init_data: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("tma {}", init_data))
        .body(Body::empty())
        .unwrap()
}

/// `Authorization: Bearer <token>` request without a body.
pub fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Request carrying a JSON body and the given extra headers.
pub fn json_request(
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: &impl serde::Serialize,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}
