//! Integration tests which drive the full router over an in-memory
//! database, one pool per test.

use axum::{
    Router,
    body::Body,
    http::{self, Request, StatusCode},
};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::MigrationHarness;
use serde_json::Value;
use tower::ServiceExt;

use crate::{MIGRATIONS, config::create_app, state::DbPool};

mod pagination;

pub fn test_app() -> Router {
    let pool: DbPool = Pool::builder()
        .max_size(1)
        .build(ConnectionManager::new(":memory:"))
        .unwrap();

    {
        let mut conn = pool.get().unwrap();
        conn.run_pending_migrations(MIGRATIONS).unwrap();
    }

    create_app(pool)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send_with_token(app, method, uri, body, None).await
}

pub async fn send_with_token(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(
            http::header::AUTHORIZATION,
            format!("Bearer {token}"),
        );
    }

    let request = match body {
        Some(body) => builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    dispatch(app, request).await
}

pub async fn send_raw_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    dispatch(app, request).await
}

async fn dispatch(
    app: &Router,
    request: Request<Body>,
) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}
