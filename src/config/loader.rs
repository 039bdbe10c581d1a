//! Configuration loading from the process environment.

use crate::config::schema::ServerConfig;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value `{value}`: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Read the configuration from the process environment.
pub fn from_env() -> Result<ServerConfig, ConfigError> {
    from_vars(|name| std::env::var(name).ok())
}

/// Build a configuration from an arbitrary variable source. Split out
/// from [`from_env`] so tests do not have to mutate process state.
pub fn from_vars(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ServerConfig, ConfigError> {
    let mut config = ServerConfig::default();

    if let Some(port) = lookup("PORT").filter(|v| !v.is_empty()) {
        config.port = port
            .parse()
            .map_err(|source| ConfigError::InvalidPort { value: port.clone(), source })?;
    }
    if let Some(host) = lookup("HOST").filter(|v| !v.is_empty()) {
        config.host = host;
    }
    config.mongodb_uri = lookup("MONGODB_URI").filter(|v| !v.is_empty());
    config.production = lookup("APP_ENV").as_deref() == Some("production");

    if let Some(client_id) = lookup("CLIENT_ID").filter(|v| !v.is_empty()) {
        config.client_id = client_id;
    }
    if let Some(client_secret) = lookup("CLIENT_SECRET").filter(|v| !v.is_empty()) {
        config.client_secret = client_secret;
    }
    if let Some(redirect_uri) = lookup("REDIRECT_URI").filter(|v| !v.is_empty()) {
        config.redirect_uri = redirect_uri;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_environment_yields_dev_defaults() {
        let config = from_vars(|_| None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "localhost");
        assert_eq!(config.mongodb_uri, None);
        assert!(!config.production);
        assert_eq!(config.client_id, "oidcCLIENT");
    }

    #[test]
    fn recognized_variables_override_defaults() {
        let env = vars(&[
            ("PORT", "4004"),
            ("HOST", "auth.example.com"),
            ("MONGODB_URI", "mongodb://db:27017/oidc"),
            ("APP_ENV", "production"),
            ("CLIENT_ID", "webapp"),
        ]);
        let config = from_vars(|name| env.get(name).cloned()).unwrap();
        assert_eq!(config.port, 4004);
        assert_eq!(config.host, "auth.example.com");
        assert_eq!(config.mongodb_uri.as_deref(), Some("mongodb://db:27017/oidc"));
        assert!(config.production);
        assert_eq!(config.client_id, "webapp");
        // unset settings keep their defaults
        assert_eq!(config.client_secret, "abcd");
    }

    #[test]
    fn malformed_port_is_a_config_error() {
        let env = vars(&[("PORT", "not-a-port")]);
        let err = from_vars(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn non_production_app_env_stays_in_dev_posture() {
        let env = vars(&[("APP_ENV", "staging")]);
        let config = from_vars(|name| env.get(name).cloned()).unwrap();
        assert!(!config.production);
    }
}
