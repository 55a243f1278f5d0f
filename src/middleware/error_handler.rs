use axum::{
    body::{Body, to_bytes},
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;

const MAX_LOGGED_BODY: usize = 4096;

/// Logs the body of every 5xx response, then passes it on unchanged.
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            error!(
                "Server error on {} {} - Status: {}, body unreadable: {}",
                method, path, parts.status, e
            );
            return Response::from_parts(parts, Body::empty());
        }
    };

    let shown = &bytes[..bytes.len().min(MAX_LOGGED_BODY)];
    error!(
        "Server error on {} {} - Status: {}, Body: {}{}",
        method,
        path,
        parts.status,
        String::from_utf8_lossy(shown),
        if bytes.len() > MAX_LOGGED_BODY { "..." } else { "" }
    );

    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, middleware::from_fn, routing::get};
    use tower::ServiceExt;

    async fn send(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn large_error_body_passes_through_intact() {
        let big = "x".repeat(MAX_LOGGED_BODY * 3);
        let expected = big.clone();
        let app = Router::new()
            .route(
                "/boom",
                get(move || {
                    let big = big.clone();
                    async move { (StatusCode::INTERNAL_SERVER_ERROR, big) }
                }),
            )
            .layer(from_fn(log_errors));

        let (status, body) = send(app, "/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.len(), expected.len());
        assert_eq!(body, expected.into_bytes());
    }

    #[tokio::test]
    async fn success_bodies_are_untouched() {
        let app = Router::new()
            .route("/ok", get(|| async { "fine" }))
            .layer(from_fn(log_errors));

        let (status, body) = send(app, "/ok").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"fine");
    }
}
