//! Protective response headers.
//!
//! # Responsibilities
//! - Compute the default content-security directive set with exactly
//!   the `form-action` directive removed: the provider's flows perform
//!   cross-origin form submissions the default directive would block
//! - Apply the companion hardening headers on every response
//! - Gate Strict-Transport-Security on the security posture, judged
//!   through the scoped proxy-aware override (HSTS over plain HTTP is
//!   meaningless)
//!
//! # Design Decisions
//! - Runs as the outermost application layer so every response carries
//!   the set, including transport-guard short-circuits
//! - Writes headers only; never touches status or body

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::config::RuntimeConfig;
use crate::security::facts::TransportFacts;

/// The well-known default protective directive set. Values mirror the
/// upstream defaults verbatim.
pub fn default_directives() -> Vec<(&'static str, &'static str)> {
    vec![
        ("default-src", "'self'"),
        ("base-uri", "'self'"),
        ("font-src", "'self' https: data:"),
        ("form-action", "'self'"),
        ("frame-ancestors", "'self'"),
        ("img-src", "'self' data:"),
        ("object-src", "'none'"),
        ("script-src", "'self'"),
        ("script-src-attr", "'none'"),
        ("style-src", "'self' https: 'unsafe-inline'"),
        ("upgrade-insecure-requests", ""),
    ]
}

/// Directive removed from the defaults for this deployment.
pub const FORM_ACTION: &str = "form-action";

/// Baseline header policy: defaults minus `form-action`, nothing else
/// removed or added.
#[derive(Debug, Clone)]
pub struct HeaderPolicy {
    directives: Vec<(&'static str, &'static str)>,
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderPolicy {
    pub fn new() -> Self {
        let directives = default_directives()
            .into_iter()
            .filter(|(name, _)| *name != FORM_ACTION)
            .collect();
        Self { directives }
    }

    pub fn directives(&self) -> &[(&'static str, &'static str)] {
        &self.directives
    }

    /// Render the directive set as a `Content-Security-Policy` value.
    pub fn csp_value(&self) -> String {
        self.directives
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    (*name).to_string()
                } else {
                    format!("{name} {value}")
                }
            })
            .collect::<Vec<_>>()
            .join(";")
    }

    /// The full protective header set for a request with the given
    /// facts. The facts passed here carry the scoped security override;
    /// only Strict-Transport-Security depends on it.
    pub fn headers_for(&self, facts: &TransportFacts) -> Vec<(HeaderName, HeaderValue)> {
        let mut out = Vec::with_capacity(12);

        if let Ok(csp) = HeaderValue::from_str(&self.csp_value()) {
            out.push((header::CONTENT_SECURITY_POLICY, csp));
        }
        out.push((
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ));
        out.push((
            HeaderName::from_static("cross-origin-resource-policy"),
            HeaderValue::from_static("same-origin"),
        ));
        out.push((
            HeaderName::from_static("origin-agent-cluster"),
            HeaderValue::from_static("?1"),
        ));
        out.push((
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ));
        if facts.connection_secure() {
            out.push((
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static("max-age=15552000; includeSubDomains"),
            ));
        }
        out.push((
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ));
        out.push((
            header::X_DNS_PREFETCH_CONTROL,
            HeaderValue::from_static("off"),
        ));
        out.push((
            HeaderName::from_static("x-download-options"),
            HeaderValue::from_static("noopen"),
        ));
        out.push((
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ));
        out.push((
            HeaderName::from_static("x-permitted-cross-domain-policies"),
            HeaderValue::from_static("none"),
        ));
        out.push((header::X_XSS_PROTECTION, HeaderValue::from_static("0")));

        out
    }
}

/// Header-policy middleware. Always mounted, always first: headers are
/// computed before downstream stages run and applied to whatever
/// response comes back, so even short-circuited responses carry them.
pub async fn security_headers(
    State(runtime): State<Arc<RuntimeConfig>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let facts = TransportFacts::of(&req);
    // Header computation judges posture from the connection layer, the
    // pipeline judges it proxy-aware. Hand the computation a scoped view
    // with the proxy-aware answer; the canonical facts stay as received.
    let posture = facts.as_secure(facts.secure(runtime.trust_proxy));
    let headers = HeaderPolicy::new().headers_for(&posture);

    let mut res = next.run(req).await;
    for (name, value) in headers {
        res.headers_mut().insert(name, value);
    }
    res
}
