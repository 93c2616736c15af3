//! HTTP-level middleware applied to every route.
//!
//! - Request-Id generation + propagation (`x-request-id`)
//! - Access log (TraceLayer); one `request` span per call carrying the
//!   request id and, once authenticated, the caller email
//! - Body size limit and request timeout from `Config`

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{Request, StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::Config;

const REQUEST_ID_HEADER: &str = "x-request-id";

// `caller` stays empty until the auth gate records it.
fn request_span<B>(req: &Request<B>) -> Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        request_id,
        caller = tracing::field::Empty,
    )
}

pub fn apply(router: Router, config: &Config) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        // TimeoutLayer errors must become responses for axum (Infallible)
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http().make_span_with(request_span));

    router.layer(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_span_has_request_id_and_caller_fields() {
        let req = Request::builder()
            .uri("/carts?email=ana@yoga.io")
            .header(REQUEST_ID_HEADER, "req-1")
            .body(())
            .unwrap();

        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            let span = request_span(&req);
            let meta = span.metadata().expect("span is enabled");

            assert_eq!(meta.name(), "request");
            for field in ["method", "uri", "request_id", "caller"] {
                assert!(meta.fields().field(field).is_some(), "missing {field}");
            }
        });
    }
}
