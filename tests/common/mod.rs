//! Shared stub collaborators for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;

use oidc_front::build_pipeline;
use oidc_front::config::RuntimeConfig;
use oidc_front::provider::{AdapterError, IdentityProvider, Interaction, StorageAdapter};
use oidc_front::views::{PlainRenderer, ViewSettings};

/// Downstream engine stand-in with fixed, recognizable responses.
pub struct StubProvider {
    issuer: String,
    interactions: HashMap<String, Interaction>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            issuer: "http://example.com".to_string(),
            interactions: HashMap::new(),
        }
    }

    pub fn with_interaction(mut self, uid: &str, prompt: &str) -> Self {
        self.interactions.insert(
            uid.to_string(),
            Interaction {
                uid: uid.to_string(),
                prompt: prompt.to_string(),
                params: serde_json::json!({ "client_id": "oidcCLIENT" }),
            },
        );
        self
    }
}

impl IdentityProvider for StubProvider {
    fn issuer(&self) -> &str {
        &self.issuer
    }

    fn handler(&self) -> Router {
        Router::new()
            .route("/authorize", get(|| async { "downstream ok" }))
            .route("/token", post(|| async { "token grant" }))
            .fallback(|| async { (StatusCode::NOT_FOUND, "downstream 404") })
    }

    fn interaction(&self, uid: &str) -> Option<Interaction> {
        self.interactions.get(uid).cloned()
    }

    fn finish_interaction(&self, uid: &str, _result: Value) -> Option<String> {
        self.interactions
            .contains_key(uid)
            .then(|| format!("/auth/resume/{uid}"))
    }
}

/// Adapter whose connect step always fails.
pub struct FailingAdapter;

#[async_trait]
impl StorageAdapter for FailingAdapter {
    async fn connect(&self) -> Result<(), AdapterError> {
        Err(AdapterError::Unreachable {
            addr: "127.0.0.1:1".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        })
    }
}

/// The production pipeline around a stub engine.
pub fn pipeline(production: bool) -> Router {
    pipeline_with(StubProvider::new(), production)
}

/// Same, with a caller-prepared stub.
pub fn pipeline_with(provider: StubProvider, production: bool) -> Router {
    let runtime = Arc::new(RuntimeConfig {
        enforce_https: production,
        trust_proxy: production,
    });
    build_pipeline(
        runtime,
        Arc::new(provider),
        Arc::new(PlainRenderer::new(ViewSettings::default())),
    )
}
