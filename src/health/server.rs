//! Health endpoint HTTP server.

use axum::{http::header, response::IntoResponse, routing::get, Router};
use tokio::net::TcpListener;

use crate::lifecycle::ShutdownSignal;

pub const HEALTH_PATH: &str = "/health";

/// Router with the single health route.
pub fn health_router() -> Router {
    Router::new().route(HEALTH_PATH, get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "OK")
}

pub struct HealthServer {
    router: Router,
}

impl HealthServer {
    pub fn new() -> Self {
        Self {
            router: health_router(),
        }
    }

    /// Serve until shutdown fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, path = HEALTH_PATH, "Health endpoint listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
            })
            .await?;

        tracing::info!("Health endpoint stopped");
        Ok(())
    }
}

impl Default for HealthServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_returns_plain_ok() {
        let response = health_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain"
        );
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_post_is_not_handled() {
        let response = health_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
