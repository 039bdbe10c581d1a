//! Pipeline composer: startup sequencing and request-chain assembly.
//!
//! # Responsibilities
//! - Run the startup steps in order, aborting on the first failure
//! - Fix the middleware order for the life of the process:
//!   header policy → transport guard (when enforcing) → presentation
//!   routes → provider handler
//! - Bind the listener only after the storage adapter has connected
//!
//! # Design Decisions
//! - `build_pipeline` is separated from `start` so tests drive the
//!   exact production chain without opening a socket
//! - Startup failures are values, not panics; the binary turns them
//!   into a non-zero exit

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{RuntimeConfig, ServerConfig};
use crate::provider::{
    AccountLookup, AdapterError, IdentityProvider, Provider, ProviderOptions, StorageAdapter,
};
use crate::routes;
use crate::security::{security_headers, transport_guard};
use crate::views::SharedRenderer;

/// Fatal startup failures. Each aborts the sequence; nothing is
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("storage adapter connect failed: {0}")]
    Adapter(#[from] AdapterError),

    #[error("storage connection string configured but no adapter wired")]
    AdapterMissing,

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// External collaborators handed to the bootstrap by the composition
/// root.
pub struct Collaborators {
    pub adapter: Option<Arc<dyn StorageAdapter>>,
    pub find_account: Option<AccountLookup>,
    pub renderer: SharedRenderer,
}

/// Assemble the request chain. Layer order is fixed here and never
/// varies per request: the header policy wraps everything (it must see
/// every response), the transport guard sits directly inside it and
/// only exists when enforcement mode is on, and the provider handler
/// plus presentation routes sit at the bottom.
pub fn build_pipeline(
    runtime: Arc<RuntimeConfig>,
    provider: Arc<dyn IdentityProvider>,
    renderer: SharedRenderer,
) -> Router {
    // Renderer is wired into route construction before mounting; the
    // handlers render synchronously while serving.
    let presentation = routes::interaction_routes(provider.clone(), renderer);

    let mut app = provider.handler().merge(presentation);

    if runtime.enforce_https {
        app = app.layer(middleware::from_fn_with_state(
            runtime.clone(),
            transport_guard,
        ));
    }

    app.layer(middleware::from_fn_with_state(runtime, security_headers))
        .layer(TraceLayer::new_for_http())
}

/// Run the startup sequence to completion, then serve until externally
/// terminated.
pub async fn start(config: ServerConfig, collab: Collaborators) -> Result<(), StartupError> {
    // 1. Storage connect gates everything below; traffic is only
    //    accepted once it has resolved.
    let adapter = match (&config.mongodb_uri, collab.adapter) {
        (Some(_), Some(adapter)) => {
            adapter.connect().await?;
            Some(adapter)
        }
        (Some(_), None) => return Err(StartupError::AdapterMissing),
        (None, adapter) => adapter,
    };

    // 2. Enforcement mode, immutable for the process lifetime.
    let runtime = Arc::new(RuntimeConfig::resolve(&config));

    // 3. Provider construction. PKCE stays at the always-false default,
    //    a deliberate relaxation for this deployment's clients.
    let mut options = ProviderOptions::new();
    options.find_account = collab.find_account;
    options.adapter = adapter;
    let provider: Arc<dyn IdentityProvider> =
        Arc::new(Provider::new(config.issuer(), options));

    // 4-7. Pipeline assembly.
    let app = build_pipeline(runtime.clone(), provider, collab.renderer);

    // 8. Listen.
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;

    tracing::info!(
        port = config.port,
        issuer = %config.issuer(),
        enforce_https = runtime.enforce_https,
        "application is listening, check its /.well-known/openid-configuration"
    );

    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
