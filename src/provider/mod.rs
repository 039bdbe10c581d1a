//! Identity-provider collaborator seam.
//!
//! The engine behind this shim is opaque: it receives a configuration
//! object and emits whatever responses its internal flows produce. This
//! module defines the interface the pipeline composes around, plus a
//! minimal standalone facade so the binary runs without a real engine
//! linked in.
//!
//! # Design Decisions
//! - Account resolution and the PKCE predicate are injected as opaque
//!   callables; the shim never interprets their results
//! - The facade implements no token, grant, or cryptographic logic;
//!   it serves the discovery document and engine-shaped 404s only

pub mod adapter;

use std::sync::Arc;

use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub use adapter::{AdapterError, MongoAdapter, StorageAdapter};

/// Account lookup: request context plus subject identifier in, opaque
/// account data (or nothing) out.
pub type AccountLookup = Arc<dyn Fn(&Parts, &str) -> Option<Value> + Send + Sync>;

/// Predicate deciding whether PKCE is required for a given client.
pub type PkceRequired = Arc<dyn Fn(&Parts, &str) -> bool + Send + Sync>;

/// Configuration handed to the engine at construction time.
#[derive(Clone)]
pub struct ProviderOptions {
    pub find_account: Option<AccountLookup>,
    pub pkce_required: PkceRequired,
    pub adapter: Option<Arc<dyn StorageAdapter>>,
}

impl ProviderOptions {
    /// Defaults for this deployment: no account lookup wired, PKCE never
    /// required (a deliberate relaxation for its client population), and
    /// in-memory storage assumed until an adapter is attached.
    pub fn new() -> Self {
        Self {
            find_account: None,
            pkce_required: Arc::new(|_, _| false),
            adapter: None,
        }
    }
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// An interaction session as exposed by the engine's interaction API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub uid: String,
    /// What the session is waiting on, e.g. `login` or `consent`.
    pub prompt: String,
    /// Opaque parameters of the pending authorization request.
    pub params: Value,
}

/// The engine as the pipeline sees it.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Issuer identity the engine advertises.
    fn issuer(&self) -> &str;

    /// Router serving the engine's protocol endpoints. Opaque: the
    /// pipeline mounts it and never inspects what it serves.
    fn handler(&self) -> Router;

    /// Look up a pending interaction session.
    fn interaction(&self, uid: &str) -> Option<Interaction>;

    /// Hand a submitted interaction result back to the engine. Returns
    /// the URL the user agent should be sent to in order to resume the
    /// flow, or nothing if the session is unknown.
    fn finish_interaction(&self, uid: &str, result: Value) -> Option<String>;
}

/// Minimal standalone engine facade: discovery document plus uniform
/// engine-shaped 404s. Real deployments link an actual engine behind
/// [`IdentityProvider`].
pub struct Provider {
    issuer: String,
    options: ProviderOptions,
}

impl Provider {
    pub fn new(issuer: impl Into<String>, options: ProviderOptions) -> Self {
        let issuer = issuer.into();
        tracing::debug!(
            issuer = %issuer,
            has_account_lookup = options.find_account.is_some(),
            has_adapter = options.adapter.is_some(),
            "provider configured"
        );
        Self { issuer, options }
    }

    pub fn options(&self) -> &ProviderOptions {
        &self.options
    }

    /// The discovery document served at the well-known path.
    fn discovery(&self) -> Value {
        json!({
            "issuer": self.issuer,
            "authorization_endpoint": format!("{}/auth", self.issuer),
            "token_endpoint": format!("{}/token", self.issuer),
            "jwks_uri": format!("{}/jwks", self.issuer),
            "response_types_supported": ["code"],
            "subject_types_supported": ["public"],
            "id_token_signing_alg_values_supported": ["RS256"],
        })
    }
}

impl IdentityProvider for Provider {
    fn issuer(&self) -> &str {
        &self.issuer
    }

    fn handler(&self) -> Router {
        let discovery = self.discovery();
        Router::new()
            .route(
                "/.well-known/openid-configuration",
                get(move || {
                    let body = discovery.clone();
                    async move { Json(body) }
                }),
            )
            .fallback(unrecognized_route)
    }

    fn interaction(&self, _uid: &str) -> Option<Interaction> {
        // The facade holds no sessions; a linked engine would.
        None
    }

    fn finish_interaction(&self, _uid: &str, _result: Value) -> Option<String> {
        None
    }
}

async fn unrecognized_route() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "invalid_request",
            "error_description": "unrecognized route or not allowed method",
        })),
    )
}
