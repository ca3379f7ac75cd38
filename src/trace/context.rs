//! Trace context for propagation between services.

use rand::Rng;

/// Identifiers correlating spans across a multi-hop request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceContext {
    /// The 128-bit trace ID (shared across all spans in the trace).
    pub trace_id: u128,

    /// The 64-bit span ID for the current span.
    pub span_id: u64,

    /// The parent span ID (None for root spans).
    pub parent_span_id: Option<u64>,
}

impl TraceContext {
    /// Create a new root context (a brand-new trace).
    pub fn new_root() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            trace_id: non_zero_u128(&mut rng),
            span_id: non_zero_u64(&mut rng),
            parent_span_id: None,
        }
    }

    /// Create a child context: same trace, new span, this span as parent.
    pub fn child(&self) -> Self {
        Self {
            trace_id: self.trace_id,
            span_id: non_zero_u64(&mut rand::thread_rng()),
            parent_span_id: Some(self.span_id),
        }
    }
}

// All-zero ids are invalid in W3C Trace Context.
fn non_zero_u128(rng: &mut impl Rng) -> u128 {
    loop {
        let id: u128 = rng.gen();
        if id != 0 {
            return id;
        }
    }
}

fn non_zero_u64(rng: &mut impl Rng) -> u64 {
    loop {
        let id: u64 = rng.gen();
        if id != 0 {
            return id;
        }
    }
}
