//! View-rendering collaborator seam.
//!
//! Template rendering is external; the pipeline only guarantees a
//! renderer is wired in before the presentation routes are mounted,
//! because route handlers render synchronously during request handling.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

/// Settings handed to the renderer at registration time.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    /// Template root directory.
    pub root: PathBuf,
    /// Template file extension.
    pub ext: String,
    /// Template caching; off for this deployment.
    pub cache: bool,
    /// Shared layout wrapped around every view.
    pub layout: String,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("views"),
            ext: "html".to_string(),
            cache: false,
            layout: "_layout".to_string(),
        }
    }
}

/// Error from a render call. Fatal to the request that triggered it,
/// never to the process.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("unknown view `{0}`")]
    UnknownView(String),

    #[error("render failed: {0}")]
    Render(String),
}

/// The rendering facility as the routes see it.
pub trait ViewRenderer: Send + Sync {
    fn settings(&self) -> &ViewSettings;

    fn render(&self, view: &str, ctx: &Value) -> Result<String, ViewError>;
}

pub type SharedRenderer = Arc<dyn ViewRenderer>;

/// Development stand-in: wraps the view name and context in a bare HTML
/// shell. Deployments register a real template engine behind
/// [`ViewRenderer`].
pub struct PlainRenderer {
    settings: ViewSettings,
}

impl PlainRenderer {
    pub fn new(settings: ViewSettings) -> Self {
        Self { settings }
    }
}

impl ViewRenderer for PlainRenderer {
    fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    fn render(&self, view: &str, ctx: &Value) -> Result<String, ViewError> {
        let body = serde_json::to_string_pretty(ctx)
            .map_err(|e| ViewError::Render(e.to_string()))?;
        Ok(format!(
            "<!doctype html><html><head><title>{view}</title></head>\
             <body><h1>{view}</h1><pre>{body}</pre></body></html>"
        ))
    }
}
