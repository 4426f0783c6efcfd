#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `nz-walks` integration tests.
//!
//! Provides an in-memory database, a fully wired router backed by a
//! temporary image directory, and small request helpers.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use nz_walks::api::rest::RestOptions;
use nz_walks::{NzWalks, NzWalksConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Seeded difficulty identifiers.
pub const EASY: &str = "54466f17-02af-48e7-8ed3-5a4a8bfacf6f";
pub const MEDIUM: &str = "ea294873-7a8c-4c0f-bfa7-a2eb492cbf8c";
pub const HARD: &str = "f808ddcd-b5e5-4d80-b732-1ca523e48434";

/// Create a fresh in-memory `SQLite` database.
///
/// The pool is pinned to one connection: every `:memory:` connection is its
/// own database.
pub async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database")
}

pub struct TestApp {
    pub router: Router,
    pub images: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(NzWalksConfig::default()).await
    }

    pub async fn with_config(mut config: NzWalksConfig) -> Self {
        let images = tempfile::tempdir().unwrap();
        config.images.dir = images.path().to_path_buf();

        let module = NzWalks::init(inmem_db().await, &config)
            .await
            .expect("module init failed");
        let router = module.router(&RestOptions::default());
        Self { router, images }
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body: bytes.to_vec(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(json_request("POST", uri, body)).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(json_request("PUT", uri, body)).await
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {:?}", self.text()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
