use std::time::{Duration, Instant};

use axum::{
    extract::State,
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::errors::ApiError;

/// Allow every origin on every response, including errors.
pub async fn cors_middleware(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let mut res = next.run(req).await;
    res.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    res
}

/// One log line per request with method, path, status and latency.
pub async fn request_log_middleware(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let res = next.run(req).await;

    let status = res.status();
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), elapsed_ms, "request handled");
    }
    res
}

/// Bound the whole request, body read included. The handler future is dropped
/// on expiry and the caller gets a 504.
pub async fn request_timeout_middleware(
    State(limit): State<Duration>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(res) => res,
        Err(_) => ApiError::RequestTimeout(limit).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn slow_router(limit: Duration) -> Router {
        Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .route("/fast", get(|| async { "quick" }))
            .layer(axum::middleware::from_fn_with_state(
                limit,
                request_timeout_middleware,
            ))
    }

    fn get_request(path: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn slow_handlers_are_cut_off_with_gateway_timeout() {
        let res = slow_router(Duration::from_millis(20))
            .oneshot(get_request("/slow"))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
        assert!(
            res.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
    }

    #[tokio::test]
    async fn handlers_within_the_deadline_are_untouched() {
        let res = slow_router(Duration::from_secs(5))
            .oneshot(get_request("/fast"))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
    }
}
