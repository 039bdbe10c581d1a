//! oidc-front: bootstrap and request-processing shim in front of an
//! OIDC provider engine.
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                 oidc-front                    │
//!   Request ───────┼─▶ header policy ─▶ transport guard ─▶ routes  │
//!                  │   (always, first)  (production only)    │     │
//!                  │                                         ▼     │
//!                  │                               provider engine │
//!                  │                                 (collaborator)│
//!                  └──────────────────────────────────────────────┘
//! ```
//!
//! The shim decides per request whether the transport is confidential
//! enough to proceed, applies the protective header set (defaults minus
//! the form-submission directive the provider's redirect flows need
//! removed), and owns the startup sequencing that wires the storage
//! adapter, view renderer, and presentation routes around the engine.

// Core subsystems
pub mod config;
pub mod security;

// Collaborator seams
pub mod provider;
pub mod routes;
pub mod views;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::{RuntimeConfig, ServerConfig};
pub use lifecycle::{build_pipeline, start, Collaborators, StartupError};
pub use provider::{IdentityProvider, Provider, ProviderOptions};
