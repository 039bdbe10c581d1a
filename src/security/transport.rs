//! Transport guard: encrypted-channel enforcement.
//!
//! # Responsibilities
//! - Judge, per request, whether the channel is secure enough for the
//!   provider (proxy-aware when the deployment trusts its proxy)
//! - Redirect safe methods (GET/HEAD) to the https form of the same URL
//!   with a 303, forcing a fresh request
//! - Reject state-changing methods over plain HTTP with a structured
//!   400 envelope, never a redirect
//!
//! # Design Decisions
//! - The decision is a pure function over the facts and the enforcement
//!   mode; the middleware only adapts its verdict to a response
//! - Short-circuiting means not invoking the next stage

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::config::RuntimeConfig;
use crate::security::facts::TransportFacts;

/// Structured rejection envelope, serialized as the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransportError {
    pub error: &'static str,
    pub error_description: &'static str,
}

/// The one rejection this guard produces.
pub const INSECURE_TRANSPORT: TransportError = TransportError {
    error: "invalid_request",
    error_description: "do yourself a favor and only use https",
};

/// Outcome of a guard decision. The composer invokes the next stage
/// only on `Continue`; the other verdicts terminate the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Redirect(String),
    Reject(TransportError),
}

/// Decide what to do with a request. Pure over its inputs; when
/// enforcement is off the guard is a no-op.
pub fn evaluate(enforce: bool, facts: &TransportFacts, trust_proxy: bool) -> Verdict {
    if !enforce || facts.secure(trust_proxy) {
        return Verdict::Continue;
    }
    if facts.is_safe_method() {
        Verdict::Redirect(rewrite_to_https(&facts.href()))
    } else {
        Verdict::Reject(INSECURE_TRANSPORT)
    }
}

/// Rewrite a URL's scheme from insecure to secure. The scheme match is
/// case-insensitive; every other component is left as-is.
pub fn rewrite_to_https(href: &str) -> String {
    match href.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http://") => {
            format!("https://{}", &href[7..])
        }
        _ => href.to_string(),
    }
}

/// Transport-guard middleware. Mounted immediately after the header
/// policy, and only when enforcement mode is on.
pub async fn transport_guard(
    State(runtime): State<Arc<RuntimeConfig>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let facts = TransportFacts::of(&req);
    match evaluate(runtime.enforce_https, &facts, runtime.trust_proxy) {
        Verdict::Continue => next.run(req).await,
        Verdict::Redirect(location) => {
            tracing::debug!(location = %location, "redirecting insecure request");
            (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
        }
        Verdict::Reject(body) => {
            tracing::debug!(method = %facts.method(), "rejecting insecure request");
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    fn facts(method: Method, uri: &str) -> TransportFacts {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        TransportFacts::of(&req)
    }

    #[test]
    fn enforcement_off_is_a_no_op() {
        let f = facts(Method::POST, "http://example.com/token");
        assert_eq!(evaluate(false, &f, false), Verdict::Continue);
    }

    #[test]
    fn secure_requests_continue() {
        let f = facts(Method::POST, "https://example.com/token");
        assert_eq!(evaluate(true, &f, false), Verdict::Continue);
    }

    #[test]
    fn safe_methods_get_a_redirect_preserving_the_url() {
        let f = facts(Method::GET, "http://example.com/authorize?client_id=x");
        assert_eq!(
            evaluate(true, &f, false),
            Verdict::Redirect("https://example.com/authorize?client_id=x".into())
        );

        let f = facts(Method::HEAD, "http://example.com/");
        assert!(matches!(evaluate(true, &f, false), Verdict::Redirect(_)));
    }

    #[test]
    fn unsafe_methods_get_the_structured_rejection() {
        let f = facts(Method::POST, "http://example.com/token");
        assert_eq!(evaluate(true, &f, false), Verdict::Reject(INSECURE_TRANSPORT));
        assert_eq!(INSECURE_TRANSPORT.error, "invalid_request");
        assert_eq!(
            INSECURE_TRANSPORT.error_description,
            "do yourself a favor and only use https"
        );
    }

    #[test]
    fn trusted_proxy_indicator_passes_the_guard() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("http://example.com/token")
            .header("x-forwarded-proto", "https")
            .body(Body::empty())
            .unwrap();
        let f = TransportFacts::of(&req);
        assert_eq!(evaluate(true, &f, true), Verdict::Continue);
        // without proxy trust the indicator is ignored
        assert_eq!(evaluate(true, &f, false), Verdict::Reject(INSECURE_TRANSPORT));
    }

    #[test]
    fn scheme_rewrite_is_case_insensitive_and_targeted() {
        assert_eq!(
            rewrite_to_https("HTTP://Example.com/a?b=c"),
            "https://Example.com/a?b=c"
        );
        assert_eq!(
            rewrite_to_https("http://example.com/http://nested"),
            "https://example.com/http://nested"
        );
        // already-secure and non-http inputs pass through unchanged
        assert_eq!(rewrite_to_https("https://example.com/"), "https://example.com/");
        assert_eq!(rewrite_to_https("ws://example.com/"), "ws://example.com/");
        assert_eq!(rewrite_to_https("http:/"), "http:/");
    }
}
