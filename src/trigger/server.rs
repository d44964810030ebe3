//! HTTP trigger server.
//!
//! # Responsibilities
//! - `POST /pass`: run one pass, answer with the report as JSON
//! - `GET /healthz`: liveness of the monitor process itself
//! - Bound each triggered pass with a request timeout
//!
//! The request body is ignored, so any scheduler webhook payload works.

use std::sync::Arc;
use std::time::Duration;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::TriggerConfig;
use crate::pass::Monitor;

#[derive(Clone)]
struct TriggerState {
    monitor: Arc<Monitor>,
}

/// Serves the pass trigger over HTTP.
pub struct TriggerServer {
    router: Router,
}

impl TriggerServer {
    /// Create a server that runs passes on `monitor`.
    pub fn new(monitor: Arc<Monitor>, config: &TriggerConfig) -> Self {
        let router = Self::build_router(
            TriggerState { monitor },
            Duration::from_secs(config.request_timeout_secs),
        );
        Self { router }
    }

    #[allow(deprecated)]
    fn build_router(state: TriggerState, request_timeout: Duration) -> Router {
        Router::new()
            .route("/pass", post(run_pass_handler))
            .route("/healthz", get(healthz_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(request_timeout)),
            )
    }

    /// Serve until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Trigger server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Trigger server received shutdown signal");
            })
            .await?;

        tracing::info!("Trigger server stopped");
        Ok(())
    }
}

async fn run_pass_handler(State(state): State<TriggerState>) -> Response {
    match state.monitor.run_pass().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Triggered pass failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn healthz_handler() -> &'static str {
    "ok"
}
