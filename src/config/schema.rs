//! Configuration schema definitions.
//!
//! `ServerConfig` holds everything read from the environment at startup.
//! `RuntimeConfig` is the per-process enforcement posture derived from it.

/// Startup configuration for the front server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listening port.
    pub port: u16,

    /// Externally-visible host, used to compute the issuer identity.
    pub host: String,

    /// Storage connection string. Presence selects the persistent
    /// adapter and triggers its connect step before the listener opens.
    pub mongodb_uri: Option<String>,

    /// Production indicator. Turns transport enforcement and proxy
    /// trust on.
    pub production: bool,

    /// Default client identifier, surfaced at startup for operators.
    pub client_id: String,

    /// Default client secret, surfaced at startup for operators.
    pub client_secret: String,

    /// Default redirect target, surfaced at startup for operators.
    pub redirect_uri: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "localhost".to_string(),
            mongodb_uri: None,
            production: false,
            client_id: "oidcCLIENT".to_string(),
            client_secret: "abcd".to_string(),
            redirect_uri: "http://localhost:8002/auth/oidc/callback".to_string(),
        }
    }
}

impl ServerConfig {
    /// Issuer identity string advertised by the provider.
    pub fn issuer(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Address the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Per-process enforcement posture, computed once during startup and
/// immutable afterwards. Shared by reference into every middleware so
/// all requests within a process lifetime observe the same mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Transport guard active: insecure requests are redirected or
    /// rejected instead of passed through.
    pub enforce_https: bool,

    /// Trust the reverse proxy's forwarded-protocol header when judging
    /// whether a request arrived over an encrypted channel.
    pub trust_proxy: bool,
}

impl RuntimeConfig {
    /// Derive the enforcement posture from the startup configuration.
    /// Production turns both the guard and proxy trust on.
    pub fn resolve(config: &ServerConfig) -> Self {
        Self {
            enforce_https: config.production,
            trust_proxy: config.production,
        }
    }
}
