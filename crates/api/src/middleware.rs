use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

/// One structured log line per request: method, path, status, latency.
pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let res = next.run(req).await;

    let status = res.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if res.status().is_server_error() {
        tracing::warn!(%method, path = %path, status, elapsed_ms, "request failed");
    } else {
        tracing::info!(%method, path = %path, status, elapsed_ms, "request handled");
    }
    res
}
