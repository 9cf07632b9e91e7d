//! Request-level logging, request IDs, and parent trace extraction.

mod parent_context;
mod request_ids;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use till_app::operators::models::Operator;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// What gets logged once a request has been answered.
#[derive(Debug)]
struct CompletedRequest<'a> {
    request_id: &'a str,
    method: &'a str,
    path: &'a str,
    status: StatusCode,
    duration_ms: u128,
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let remote_addr = req.remote_addr().to_string();
    let names = spans::request_span_name(&method, &path);
    let _in_flight_request = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %remote_addr,
        operator = tracing::field::Empty,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent_context) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent_context)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let duration = started.elapsed();
    let status = request_ids::response_status_or_ok(res.status_code);

    metrics::observe_request(
        &method,
        &names.otel_path,
        status.as_u16(),
        duration.as_secs_f64(),
    );

    if let Ok(operator) = depot.obtain::<Operator>() {
        span.record("operator", operator.username.as_str());
    }

    span.record("status", status.as_u16());
    span.record("duration_ms", duration.as_millis());

    span.in_scope(|| {
        log_completion(&CompletedRequest {
            request_id: &request_id,
            method: &method,
            path: &path,
            status,
            duration_ms: duration.as_millis(),
        });
    });
}

fn log_completion(request: &CompletedRequest<'_>) {
    let status = request.status.as_u16();
    let duration_ms = request.duration_ms;
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    info!(status, duration_ms, "request.completed");

    if request.status.is_server_error() {
        error!(
            status,
            method = %request.method,
            path = %request.path,
            request_id = %request.request_id,
            "server error response"
        );
    } else if request.status.is_client_error() {
        warn!(
            status,
            method = %request.method,
            path = %request.path,
            request_id = %request.request_id,
            "client error response"
        );
    }

    if duration_ms > threshold_ms {
        warn!(
            method = %request.method,
            path = %request.path,
            request_id = %request.request_id,
            duration_ms,
            threshold_ms,
            "slow request detected"
        );
    }
}
