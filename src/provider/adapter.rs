//! Persistent storage adapter seam.
//!
//! The adapter is optional: absent, the engine assumes in-memory
//! storage. Present, its connect hook must resolve before the listener
//! opens. Persistence itself is delegated to the engine; this shim only
//! drives the connect-before-serve lifecycle step.

use async_trait::async_trait;
use url::Url;

/// Errors from the adapter's connect lifecycle step.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("invalid storage connection string: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("storage connection string has no host")]
    MissingHost,

    #[error("storage unreachable at {addr}: {source}")]
    Unreachable {
        addr: String,
        source: std::io::Error,
    },
}

/// Connect-before-serve lifecycle hook. Awaited exactly once at
/// startup; traffic is only accepted after it resolves.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    async fn connect(&self) -> Result<(), AdapterError>;
}

/// Adapter for a MongoDB-style connection string. Its connect step
/// validates the string and probes reachability; the engine owns the
/// actual driver and every storage operation.
pub struct MongoAdapter {
    uri: String,
}

impl MongoAdapter {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

#[async_trait]
impl StorageAdapter for MongoAdapter {
    async fn connect(&self) -> Result<(), AdapterError> {
        let parsed = Url::parse(&self.uri)?;
        let host = parsed.host_str().ok_or(AdapterError::MissingHost)?;
        let port = parsed.port().unwrap_or(27017);
        let addr = format!("{host}:{port}");

        tokio::net::TcpStream::connect(&addr)
            .await
            .map_err(|source| AdapterError::Unreachable { addr: addr.clone(), source })?;

        tracing::info!(addr = %addr, "storage adapter connected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_connection_string_is_rejected() {
        let err = MongoAdapter::new("not a uri").connect().await.unwrap_err();
        assert!(matches!(err, AdapterError::InvalidUri(_)));
    }

    #[tokio::test]
    async fn hostless_connection_string_is_rejected() {
        let err = MongoAdapter::new("mongodb:oidc").connect().await.unwrap_err();
        assert!(matches!(err, AdapterError::MissingHost));
    }

    #[tokio::test]
    async fn connect_succeeds_against_a_listening_socket() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let adapter = MongoAdapter::new(format!("mongodb://127.0.0.1:{}/oidc", addr.port()));
        adapter.connect().await.unwrap();
    }
}
