//! Per-request transport facts.
//!
//! A read-only snapshot of the pieces of an inbound request the security
//! stages care about: method, how the connection arrived, what a trusted
//! reverse proxy says about it, and the target URL. Built once per
//! request, discarded with it.

use axum::body::Body;
use axum::http::{header, Method, Request};

/// Snapshot of a request's transport-relevant properties.
#[derive(Debug, Clone)]
pub struct TransportFacts {
    method: Method,
    connection_secure: bool,
    forwarded_https: bool,
    host: String,
    path_and_query: String,
}

impl TransportFacts {
    /// Capture the facts of an inbound request.
    ///
    /// The connection-layer flag reflects the request's own scheme; the
    /// forwarded flag reflects the first value of `X-Forwarded-Proto`,
    /// which is only consulted when the caller trusts its proxy.
    pub fn of(req: &Request<Body>) -> Self {
        let connection_secure = req
            .uri()
            .scheme_str()
            .map(|s| s.eq_ignore_ascii_case("https"))
            .unwrap_or(false);

        let forwarded_https = req
            .headers()
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().eq_ignore_ascii_case("https"))
            .unwrap_or(false);

        // Authority from an absolute-form URI wins; origin-form requests
        // carry the host in the Host header.
        let host = req
            .uri()
            .authority()
            .map(|a| a.to_string())
            .or_else(|| {
                req.headers()
                    .get(header::HOST)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_else(|| "/".to_string());

        Self {
            method: req.method().clone(),
            connection_secure,
            forwarded_https,
            host,
            path_and_query,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Whether this method is presumed not to alter server state and is
    /// therefore eligible for a redirect rather than a rejection.
    pub fn is_safe_method(&self) -> bool {
        self.method == Method::GET || self.method == Method::HEAD
    }

    /// Connection-layer truth: the channel itself is encrypted.
    pub fn connection_secure(&self) -> bool {
        self.connection_secure
    }

    /// Proxy-aware security posture: the channel is encrypted, or a
    /// trusted reverse proxy reports that the client leg was.
    pub fn secure(&self, trust_proxy: bool) -> bool {
        self.connection_secure || (trust_proxy && self.forwarded_https)
    }

    /// Scoped override: a copy of these facts with the connection-layer
    /// flag replaced. Handed to computations that infer posture from
    /// the connection layer; the canonical facts stay untouched.
    pub fn as_secure(&self, secure: bool) -> Self {
        Self {
            connection_secure: secure,
            ..self.clone()
        }
    }

    /// The absolute URL of the request as received.
    pub fn href(&self) -> String {
        let scheme = if self.connection_secure { "https" } else { "http" };
        format!("{}://{}{}", scheme, self.host, self.path_and_query)
    }
}
