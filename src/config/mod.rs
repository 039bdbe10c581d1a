//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read PORT, HOST, MONGODB_URI, APP_ENV, client settings)
//!     → ServerConfig (validated, immutable)
//!     → RuntimeConfig (enforcement mode) derived once during startup
//!     → shared via Arc to every middleware
//! ```
//!
//! # Design Decisions
//! - Config is read exactly once at process start; no reload
//! - All settings have defaults so a bare environment boots a dev server
//! - Enforcement mode lives in RuntimeConfig and is never re-read from
//!   the environment after startup; every request observes the same mode

pub mod loader;
pub mod schema;

pub use loader::ConfigError;
pub use schema::RuntimeConfig;
pub use schema::ServerConfig;
