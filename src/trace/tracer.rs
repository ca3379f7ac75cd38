//! The tracer seam: extract, span lifecycle, inject.

use std::time::Instant;

use axum::http::{HeaderMap, HeaderValue};

use crate::trace::context::TraceContext;
use crate::trace::propagation::{format_traceparent, parse_traceparent, TRACEPARENT};

/// A single traced unit of work.
///
/// Finished exactly once: [`Tracer::finish`] takes the span by value.
#[derive(Debug)]
pub struct Span {
    context: TraceContext,
    operation: String,
    started: Instant,
    tags: Vec<(&'static str, String)>,
}

impl Span {
    fn new(context: TraceContext, operation: &str) -> Self {
        Self {
            context,
            operation: operation.to_string(),
            started: Instant::now(),
            tags: Vec::new(),
        }
    }

    /// The context identifying this span on the wire.
    pub fn context(&self) -> &TraceContext {
        &self.context
    }

    /// Attach a tag. Later values for the same key win.
    pub fn tag(&mut self, key: &'static str, value: impl Into<String>) {
        self.tags.push((key, value.into()));
    }
}

/// Trace context propagation operations.
///
/// Implementations must never block or fail the surrounding request; a
/// missing or unreachable tracing backend degrades to no-ops.
pub trait Tracer: Send + Sync {
    /// Deserialize a trace context from inbound headers. Absent or
    /// malformed context yields a fresh root (a new trace).
    fn extract(&self, headers: &HeaderMap) -> TraceContext;

    /// Begin a child span of `parent`.
    fn start_span(&self, parent: &TraceContext, operation: &str) -> Span;

    /// Serialize the span's context into `headers`. Existing keys are
    /// preserved unless overwritten by trace keys.
    fn inject(&self, span: &Span, headers: &mut HeaderMap);

    /// Tag the span with the response status and mark it complete.
    fn finish(&self, span: Span, status: u16);
}

/// Tracer speaking W3C Trace Context headers, reporting finished spans as
/// structured log events.
#[derive(Debug, Default, Clone)]
pub struct HeaderTracer;

impl Tracer for HeaderTracer {
    fn extract(&self, headers: &HeaderMap) -> TraceContext {
        headers
            .get_all(TRACEPARENT)
            .iter()
            .last()
            .and_then(|value| value.to_str().ok())
            .and_then(parse_traceparent)
            .unwrap_or_else(TraceContext::new_root)
    }

    fn start_span(&self, parent: &TraceContext, operation: &str) -> Span {
        Span::new(parent.child(), operation)
    }

    fn inject(&self, span: &Span, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&format_traceparent(span.context())) {
            headers.insert(TRACEPARENT, value);
        }
    }

    fn finish(&self, span: Span, status: u16) {
        let elapsed = span.started.elapsed();
        let parent_span_id = span
            .context
            .parent_span_id
            .map(|id| format!("{id:016x}"))
            .unwrap_or_default();
        tracing::info!(
            target: "hola::span",
            trace_id = %format_args!("{:032x}", span.context.trace_id),
            span_id = %format_args!("{:016x}", span.context.span_id),
            parent_span_id = %parent_span_id,
            operation = %span.operation,
            status = u64::from(status),
            elapsed_us = elapsed.as_micros() as u64,
            tags = ?span.tags,
            "span finished"
        );
    }
}

/// Tracer used when tracing is disabled. Produces valid contexts so the
/// request path is identical, but emits nothing and injects nothing.
#[derive(Debug, Default, Clone)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn extract(&self, _headers: &HeaderMap) -> TraceContext {
        TraceContext::new_root()
    }

    fn start_span(&self, parent: &TraceContext, operation: &str) -> Span {
        Span::new(parent.child(), operation)
    }

    fn inject(&self, _span: &Span, _headers: &mut HeaderMap) {}

    fn finish(&self, _span: Span, _status: u16) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_continues_inbound_trace() {
        let tracer = HeaderTracer;
        let mut headers = HeaderMap::new();
        headers.insert(
            TRACEPARENT,
            HeaderValue::from_static("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
        );
        let context = tracer.extract(&headers);
        assert_eq!(context.trace_id, 0x4bf92f3577b34da6a3ce929d0e0e4736);
    }

    #[test]
    fn extract_without_header_starts_new_trace() {
        let a = HeaderTracer.extract(&HeaderMap::new());
        let b = HeaderTracer.extract(&HeaderMap::new());
        assert_ne!(a.trace_id, b.trace_id);
    }

    #[test]
    fn extract_malformed_header_starts_new_trace() {
        let mut headers = HeaderMap::new();
        headers.insert(TRACEPARENT, HeaderValue::from_static("not-a-traceparent"));
        let context = HeaderTracer.extract(&headers);
        assert!(context.parent_span_id.is_none());
    }

    #[test]
    fn inject_overwrites_stale_traceparent_and_keeps_other_keys() {
        let tracer = HeaderTracer;
        let parent = TraceContext::new_root();
        let span = tracer.start_span(&parent, "GET");

        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("abc"));
        headers.insert(TRACEPARENT, HeaderValue::from_static("00-aa-bb-01"));
        tracer.inject(&span, &mut headers);

        assert_eq!(headers.get("x-request-id").unwrap(), "abc");
        let value = headers.get(TRACEPARENT).unwrap().to_str().unwrap();
        let reparsed = parse_traceparent(value).unwrap();
        assert_eq!(reparsed.trace_id, parent.trace_id);
        assert_eq!(reparsed.span_id, span.context().span_id);
    }

    #[test]
    fn noop_injects_nothing() {
        let tracer = NoopTracer;
        let span = tracer.start_span(&TraceContext::new_root(), "GET");
        let mut headers = HeaderMap::new();
        tracer.inject(&span, &mut headers);
        assert!(headers.is_empty());
    }
}
