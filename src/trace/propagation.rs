//! W3C Trace Context (`traceparent`) wire format.
//!
//! Layout: `{version:2x}-{trace_id:32x}-{parent_id:16x}-{flags:2x}`.
//! Only version 00 is emitted; any version is accepted on parse as long as
//! the field shapes hold.

use crate::trace::context::TraceContext;

/// Propagation header name (case-insensitive on the wire).
pub const TRACEPARENT: &str = "traceparent";

/// Sampled flag; every span we emit is sampled.
const FLAGS_SAMPLED: u8 = 0x01;

/// Serialize a context into a `traceparent` value.
pub fn format_traceparent(context: &TraceContext) -> String {
    format!(
        "00-{:032x}-{:016x}-{:02x}",
        context.trace_id, context.span_id, FLAGS_SAMPLED
    )
}

/// Parse a `traceparent` value into the sender's context.
///
/// Returns None on any malformation: wrong field count, wrong field width,
/// non-hex characters, or all-zero ids.
pub fn parse_traceparent(value: &str) -> Option<TraceContext> {
    let mut parts = value.trim().split('-');
    let version = parts.next()?;
    let trace_id = parts.next()?;
    let parent_id = parts.next()?;
    let flags = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if version.len() != 2 || flags.len() != 2 {
        return None;
    }
    u8::from_str_radix(version, 16).ok()?;
    u8::from_str_radix(flags, 16).ok()?;
    if trace_id.len() != 32 || parent_id.len() != 16 {
        return None;
    }

    let trace_id = u128::from_str_radix(trace_id, 16).ok()?;
    let span_id = u64::from_str_radix(parent_id, 16).ok()?;
    if trace_id == 0 || span_id == 0 {
        return None;
    }

    Some(TraceContext {
        trace_id,
        span_id,
        parent_span_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let context = TraceContext::new_root();
        let parsed = parse_traceparent(&format_traceparent(&context)).unwrap();
        assert_eq!(parsed.trace_id, context.trace_id);
        assert_eq!(parsed.span_id, context.span_id);
    }

    #[test]
    fn parses_reference_value() {
        let context =
            parse_traceparent("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01").unwrap();
        assert_eq!(context.trace_id, 0x4bf92f3577b34da6a3ce929d0e0e4736);
        assert_eq!(context.span_id, 0x00f067aa0ba902b7);
    }

    #[test]
    fn rejects_malformed_values() {
        for value in [
            "",
            "garbage",
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7", // missing flags
            "00-short-00f067aa0ba902b7-01",
            "00-4bf92f3577b34da6a3ce929d0e0e4736-zzf067aa0ba902b7-01",
            "00-00000000000000000000000000000000-00f067aa0ba902b7-01", // zero trace id
            "00-4bf92f3577b34da6a3ce929d0e0e4736-0000000000000000-01", // zero span id
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01-extra",
        ] {
            assert!(parse_traceparent(value).is_none(), "accepted {value:?}");
        }
    }
}
