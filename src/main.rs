//! Standalone bootstrap binary.
//!
//! Reads configuration from the environment, logs the resolved
//! settings for operator visibility, wires the collaborators, and runs
//! the startup sequence. Any startup failure exits non-zero.

use std::process::ExitCode;
use std::sync::Arc;

use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oidc_front::config;
use oidc_front::lifecycle::{start, Collaborators};
use oidc_front::provider::{AccountLookup, MongoAdapter, StorageAdapter};
use oidc_front::views::{PlainRenderer, ViewSettings};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oidc_front=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("oidc-front v0.1.0 starting");

    let config = match config::loader::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        port = config.port,
        issuer = %config.issuer(),
        production = config.production,
        client_id = %config.client_id,
        client_secret_len = config.client_secret.len(),
        redirect_uri = %config.redirect_uri,
        storage = config.mongodb_uri.is_some(),
        "Configuration loaded"
    );

    let adapter: Option<Arc<dyn StorageAdapter>> = config
        .mongodb_uri
        .as_deref()
        .map(|uri| Arc::new(MongoAdapter::new(uri)) as Arc<dyn StorageAdapter>);

    // Development account resolution: every subject resolves to itself.
    // The shim passes the result through without interpreting it.
    let find_account: AccountLookup =
        Arc::new(|_parts, sub| Some(json!({ "accountId": sub })));

    let collaborators = Collaborators {
        adapter,
        find_account: Some(find_account),
        renderer: Arc::new(PlainRenderer::new(ViewSettings::default())),
    };

    if let Err(err) = start(config, collaborators).await {
        tracing::error!(error = %err, "startup failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
