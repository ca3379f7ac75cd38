//! Distributed tracing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request:
//!     headers → tracer.extract() → TraceContext (caller's, or fresh root)
//!     → tracer.start_span() → request span, stored in request extensions
//!
//! Outbound call:
//!     request span context → tracer.start_span() → client span
//!     → tracer.inject() → traceparent header on the downstream request
//!     → tracer.finish(client span) when the call settles
//!
//! Response egress:
//!     tracer.finish(request span, status) after the body is determined
//! ```
//!
//! # Design Decisions
//! - The tracer is an injected dependency, not a process global; the no-op
//!   implementation keeps the request path identical when tracing is off
//! - W3C Trace Context (`traceparent`) is the only wire format
//! - Spans are emitted as structured log events; an exporter would plug in
//!   behind the same trait
//! - `finish` consumes the span, so a span cannot be finished twice

pub mod context;
pub mod propagation;
pub mod tracer;

pub use context::TraceContext;
pub use tracer::{HeaderTracer, NoopTracer, Span, Tracer};
