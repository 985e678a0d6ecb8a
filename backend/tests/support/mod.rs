#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header::CONTENT_TYPE},
};
use backend::{
    axum_http::http_serve::build_router,
    config::{
        config_model::{BackendServer, Content, DotEnvyConfig, Uploads},
        stage::Stage,
    },
};
use chrono::Utc;
use crates::infra::memory::content_stores::ContentStores;
use serde_json::Value;

pub const BOUNDARY: &str = "X-HEALING-TEST-BOUNDARY";

pub struct TestApp {
    pub router: Router,
    pub stores: ContentStores,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub fn new(seed_demo_content: bool) -> Self {
        let upload_dir = std::env::temp_dir().join(format!(
            "healing-backend-{}-{}",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let config = DotEnvyConfig {
            backend_server: BackendServer {
                port: 0,
                body_limit: 20,
                timeout: 30,
            },
            uploads: Uploads {
                dir: upload_dir.clone(),
                public_prefix: "/uploads".to_string(),
                max_file_mb: 1,
            },
            content: Content { seed_demo_content },
            stage: Stage::Local,
        };
        let stores = ContentStores::initialize(seed_demo_content);
        let router = build_router(&config, &stores).unwrap();

        Self {
            router,
            stores,
            upload_dir,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn post_multipart(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Builds a multipart body from text fields and `(field, file name, bytes)` files.
pub fn multipart_body(texts: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in texts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn json_body(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
