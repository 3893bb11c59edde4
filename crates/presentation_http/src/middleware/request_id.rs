//! Request correlation
//!
//! Every request gets an `X-Request-Id`. A well-formed incoming value is
//! kept, otherwise a UUID v7 is generated. The id is stored in the request
//! extensions, recorded on the request span and echoed on the response.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{body::Body, extract::Request, http::header::HeaderValue, response::Response};
use infrastructure::X_REQUEST_ID;
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Longest caller-supplied id that is accepted as-is
const MAX_REQUEST_ID_LEN: usize = 128;

/// Adds request id handling to a service
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

/// Correlation id of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Use `raw` if it is a sensible token, otherwise generate a fresh id
    pub fn from_header(raw: Option<&HeaderValue>) -> Self {
        raw.and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| is_acceptable(s))
            .map_or_else(Self::generate, |s| Self(s.to_string()))
    }

    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_acceptable(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.len() <= MAX_REQUEST_ID_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let request_id = RequestId::from_header(request.headers().get(X_REQUEST_ID));
        let span = tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %request.method(),
            path = %request.uri().path(),
        );
        let header = HeaderValue::from_str(request_id.as_str()).ok();
        request.extensions_mut().insert(request_id);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let mut response = inner.call(request).await?;
                if let Some(value) = header {
                    response.headers_mut().insert(X_REQUEST_ID, value);
                }
                Ok(response)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use axum::{Extension, Router, routing::get};
    use tower::ServiceExt;

    use super::*;

    async fn echo(Extension(id): Extension<RequestId>) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(echo))
            .layer(RequestIdLayer::new())
    }

    fn request(id: Option<&str>) -> Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(id) = id {
            builder = builder.header(X_REQUEST_ID, id);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn incoming_id_is_echoed() {
        let response = app().oneshot(request(Some("abc-123"))).await.unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "abc-123");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"abc-123");
    }

    #[tokio::test]
    async fn missing_id_is_generated_as_uuid() {
        let response = app().oneshot(request(None)).await.unwrap();
        let id = response.headers()[X_REQUEST_ID].to_str().unwrap();
        let parsed = Uuid::parse_str(id).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[tokio::test]
    async fn unsafe_id_is_replaced() {
        let response = app().oneshot(request(Some("a b<script>"))).await.unwrap();
        let id = response.headers()[X_REQUEST_ID].to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn overlong_id_is_rejected() {
        let long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        assert!(!is_acceptable(&long));
        assert!(is_acceptable(&"x".repeat(MAX_REQUEST_ID_LEN)));
    }
}
