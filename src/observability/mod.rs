//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!     → trace spans (see crate::trace), emitted as log events
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Prometheus scrape of the metrics listener
//! ```
//!
//! # Design Decisions
//! - Log level defaults from config, overridable via RUST_LOG
//! - Metrics exposition runs on its own listener, off the request path
//! - The liveness endpoint stays outside all of this

pub mod logging;
pub mod metrics;
