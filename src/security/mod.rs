//! Security subsystem: transport enforcement and protective headers.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (compute protective header set, applied to the
//!       response on the way out; always runs, always first)
//!     → transport.rs (continue / redirect / reject, mounted only when
//!       enforcement mode is on)
//!     → provider handler and presentation routes
//! ```
//!
//! # Design Decisions
//! - Both units are stateless and pure per request; decisions depend
//!   only on the request's own facts plus the immutable RuntimeConfig
//! - Short-circuiting is an explicit stage verdict, not a hidden throw
//! - Safe methods get a redirect, state-changing methods a hard 400:
//!   redirecting a submission across schemes risks silent replay

pub mod facts;
pub mod headers;
pub mod transport;

pub use facts::TransportFacts;
pub use headers::{security_headers, HeaderPolicy};
pub use transport::{evaluate, transport_guard, Verdict};
