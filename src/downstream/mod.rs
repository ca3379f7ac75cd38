//! Downstream (aloha) call subsystem.
//!
//! # Data Flow
//! ```text
//! Chaining request:
//!     resolver.rs (env → EndpointTarget, cached behind a staleness window)
//!     → client.rs (GET {target}api/aloha, trace headers injected)
//!     → hard timeout over connect + response + decode
//!     → Vec<String> on success, the static fallback on any failure
//! ```
//!
//! # Design Decisions
//! - Total-fallback policy: timeout, transport error, bad status, and
//!   decode error all collapse into the same fallback value; the caller
//!   never sees an error for this call
//! - No retries and no breaker state; every call independently applies
//!   timeout-then-fallback
//! - Timing out abandons the in-flight request so the connection is not
//!   left running in the background

pub mod client;
pub mod resolver;

pub use client::{AlohaClient, ALOHA_FALLBACK};
pub use resolver::{EndpointResolver, EndpointTarget, DEFAULT_ALOHA_URL};
