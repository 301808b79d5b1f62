use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::Instrument;

use super::request_id::RequestId;

/// Logs one event per request inside a `request` span carrying id, method and path.
/// Health probes log at debug level only.
#[derive(Clone)]
pub struct LoggingLayer;

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingService { inner }
    }
}

#[derive(Clone)]
pub struct LoggingService<S> {
    inner: S,
}

fn log_completion(status: StatusCode, quiet: bool, query: &str, duration_ms: u64) {
    if status.is_server_error() {
        tracing::error!(status = %status, query, duration_ms, "Directory request failed");
    } else if status.is_client_error() {
        tracing::warn!(status = %status, query, duration_ms, "Directory request rejected");
    } else if quiet {
        tracing::debug!(status = %status, duration_ms, "Health probe served");
    } else {
        tracing::info!(status = %status, query, duration_ms, "Directory request served");
    }
}

impl<S> Service<Request<Body>> for LoggingService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let start = Instant::now();
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown".to_string());
        let path = req.uri().path().to_string();
        let query = req.uri().query().unwrap_or("").to_string();
        let quiet = path.starts_with("/health");

        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            path = %path,
        );

        let mut inner = self.inner.clone();

        Box::pin(
            async move {
                let response = inner.call(req).await?;
                log_completion(
                    response.status(),
                    quiet,
                    &query,
                    start.elapsed().as_millis() as u64,
                );
                Ok(response)
            }
            .instrument(span),
        )
    }
}
