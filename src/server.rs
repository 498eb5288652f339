//! HTTP surface for the analyze handler.

use crate::models::HandlerResponse;
use crate::orchestrator::{cors_headers, Orchestrator};
use crate::Result;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/", post(analyze).options(preflight))
        .route("/analyze", post(analyze).options(preflight))
        .route("/health", get(|| async { "OK" }))
        .with_state(orchestrator)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, orchestrator: Arc<Orchestrator>) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(orchestrator))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn analyze(State(orchestrator): State<Arc<Orchestrator>>, body: Bytes) -> HandlerResponse {
    // Invalid UTF-8 is left for JSON parsing to reject with the error envelope.
    let body = String::from_utf8_lossy(&body);
    orchestrator.handle(&body).await
}

async fn preflight() -> Response {
    (StatusCode::OK, header_map(&cors_headers())).into_response()
}

fn header_map(headers: &BTreeMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            }
            _ => warn!("Dropping invalid response header {}: {}", name, value),
        }
    }
    map
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, header_map(&self.headers), self.body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_response_into_http() {
        let response = crate::orchestrator::error_response("boom").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(response.headers()["content-type"], "application/json");
    }

    #[test]
    fn test_invalid_headers_are_dropped() {
        let headers = BTreeMap::from([
            ("X-Good".to_string(), "yes".to_string()),
            ("bad header".to_string(), "no".to_string()),
        ]);

        let map = header_map(&headers);
        assert_eq!(map.len(), 1);
        assert_eq!(map["x-good"], "yes");
    }

    #[tokio::test]
    async fn test_preflight_returns_cors_headers() {
        let response = preflight().await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-methods"], "POST, OPTIONS");
        assert_eq!(response.headers()["access-control-allow-headers"], "Content-Type");
    }
}
