//! Presentation routes: login/consent interaction screens.
//!
//! Thin delegation to the provider's interaction API. Built only after
//! the provider exists and the view renderer is registered, since the
//! handlers render synchronously while serving.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::provider::IdentityProvider;
use crate::views::SharedRenderer;

#[derive(Clone)]
struct RoutesState {
    provider: Arc<dyn IdentityProvider>,
    renderer: SharedRenderer,
}

/// Build the interaction routes against a provider and a registered
/// renderer.
pub fn interaction_routes(
    provider: Arc<dyn IdentityProvider>,
    renderer: SharedRenderer,
) -> Router {
    Router::new()
        .route(
            "/interaction/{uid}",
            get(interaction_screen).post(finish_interaction),
        )
        .with_state(RoutesState { provider, renderer })
}

async fn interaction_screen(
    State(state): State<RoutesState>,
    Path(uid): Path<String>,
) -> Response {
    let Some(interaction) = state.provider.interaction(&uid) else {
        return session_not_found().into_response();
    };

    let view = match interaction.prompt.as_str() {
        "consent" => "interact",
        _ => "login",
    };
    let ctx = json!({
        "uid": interaction.uid,
        "title": "Sign-in",
        "details": interaction.params,
    });

    match state.renderer.render(view, &ctx) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(uid = %uid, view = %view, error = %err, "view render failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "server_error",
                    "error_description": "interaction screen could not be rendered",
                })),
            )
                .into_response()
        }
    }
}

async fn finish_interaction(
    State(state): State<RoutesState>,
    Path(uid): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let result = json!(fields);
    match state.provider.finish_interaction(&uid, result) {
        // 303 so the user agent re-requests the resumed flow with GET
        Some(location) => Redirect::to(&location).into_response(),
        None => session_not_found().into_response(),
    }
}

fn session_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "invalid_request",
            "error_description": "interaction session not found",
        })),
    )
}
