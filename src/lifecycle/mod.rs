//! Lifecycle management: startup sequencing.
//!
//! # Data Flow
//! ```text
//! main
//!     → startup::start
//!         1. storage adapter connect (gates everything below)
//!         2. enforcement mode resolved, fixed for the process
//!         3. provider constructed
//!         4-7. pipeline assembled in fixed order
//!         8. listener bound, readiness logged, serve
//!     → Err(StartupError) → main logs and exits non-zero
//! ```

pub mod startup;

pub use startup::{build_pipeline, start, Collaborators, StartupError};
