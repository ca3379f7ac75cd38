//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID at ingress, echoed on responses)
//!     → trace context extracted, identity resolved (extensions)
//!     → handler (greeting composition, possibly a downstream call)
//!     → request span finished with the response status
//!
//! /health bypasses the whole stack: no tracing, no identity, no
//! downstream calls.
//! ```

pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
