//! W3C trace context carried in on request headers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// Remote parent for the request span, if the caller sent a usable one.
///
/// Extraction starts from an empty context, so a request without trace
/// headers never picks up whatever span happens to be active.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let carrier = HeaderCarrier(headers);

    global::get_text_map_propagator(|propagator| {
        let context = propagator.extract_with_context(&Context::new(), &carrier);
        let remote = context.span().span_context().is_valid();

        remote.then_some(context)
    })
}

#[derive(Debug)]
struct HeaderCarrier<'a>(&'a HeaderMap);

impl Extractor for HeaderCarrier<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use salvo::http::HeaderValue;

    use super::*;

    const TRACEPARENT: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";

    fn headers(traceparent: Option<&'static str>) -> HeaderMap {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let mut headers = HeaderMap::new();

        if let Some(value) = traceparent {
            headers.insert("traceparent", HeaderValue::from_static(value));
        }

        headers
    }

    #[test]
    fn valid_traceparent_becomes_the_parent() {
        let context = extract_parent_context(&headers(Some(TRACEPARENT)));

        let trace_id = context.map(|context| context.span().span_context().trace_id().to_string());

        assert_eq!(
            trace_id.as_deref(),
            Some("4bf92f3577b34da6a3ce929d0e0e4736"),
            "expected remote trace id"
        );
    }

    #[test]
    fn missing_or_malformed_traceparent_is_ignored() {
        assert!(
            extract_parent_context(&headers(None)).is_none(),
            "expected no parent without headers"
        );
        assert!(
            extract_parent_context(&headers(Some("00-not-a-trace-01"))).is_none(),
            "expected malformed header to be ignored"
        );
    }
}
