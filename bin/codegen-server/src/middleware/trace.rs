use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::HeaderValue;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::ServerError;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Largest request body accepted, matching axum's default `Json` limit.
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

/// Bodies above this size are never logged.
const MAX_LOGGED_BODY: usize = 1024;

/// Wrap each request in an `http_request` span keyed by a trace id.
///
/// The id comes from an incoming `x-trace-id` header when it is a UUID and is
/// generated otherwise; it is echoed back on the response.
pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %method,
        path = %path,
    );

    async move {
        info!("→ request started");
        let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();

        let response = match buffer_request(req).await {
            Ok(mut req) => {
                if let Some(v) = header_value.clone() {
                    req.headers_mut().insert(X_TRACE_ID, v);
                }
                next.run(req).await
            }
            Err(rejection) => rejection.into_response(),
        };

        let (parts, body) = response.into_parts();
        let res_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(_) => Bytes::new(),
        };
        log_body("response", &parts.headers, &res_bytes);
        let mut response = Response::from_parts(parts, Body::from(res_bytes));
        if let Some(v) = header_value {
            response.headers_mut().insert(X_TRACE_ID, v);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Buffer the request body, stopping once it exceeds [`MAX_REQUEST_BODY`].
async fn buffer_request(req: Request<Body>) -> Result<Request<Body>, ServerError> {
    let (parts, body) = req.into_parts();
    let bytes = match Limited::new(body, MAX_REQUEST_BODY).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<LengthLimitError>() => {
            warn!(limit = MAX_REQUEST_BODY, "request body too large");
            return Err(ServerError::PayloadTooLarge(MAX_REQUEST_BODY));
        }
        Err(_) => Bytes::new(),
    };
    log_body("request", &parts.headers, &bytes);
    Ok(Request::from_parts(parts, Body::from(bytes)))
}

/// Log a buffered body at debug level when it is small JSON.
fn log_body(direction: &str, headers: &header::HeaderMap, bytes: &Bytes) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let is_json = content_type.contains("application/json");

    if is_json && bytes.len() < MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            debug!("{direction} body: {text}");
        }
    } else if !bytes.is_empty() {
        debug!("{direction} body: [skipped: type={content_type}, size={}]", bytes.len());
    }
}
