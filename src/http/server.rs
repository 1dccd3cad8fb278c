//! HTTP server setup and message ingest.
//!
//! # Responsibilities
//! - Create the Axum router with the ingest handler
//! - Merge in the admin routes when enabled
//! - Wire up middleware (tracing, request timeout)
//! - Serve with graceful shutdown

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin;
use crate::config::{AdminConfig, RelayConfig};
use crate::keywords::KeywordStore;
use crate::matching::{AlertPayload, MatchEngine};
use crate::relay::{AlertDispatcher, InboundMessage, Relay};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub store: Arc<KeywordStore>,
    pub dispatcher: Arc<AlertDispatcher>,
    pub admin: AdminConfig,
}

/// HTTP server for the keyword relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around an initialized keyword store.
    pub fn new(config: &RelayConfig, store: Arc<KeywordStore>) -> Self {
        let engine = MatchEngine::new(config.alerts.destination_override.clone());
        let relay = Arc::new(Relay::new(store.clone(), engine));
        let dispatcher = Arc::new(AlertDispatcher::new(&config.alerts));

        let state = AppState {
            relay,
            store,
            dispatcher,
            admin: config.admin.clone(),
        };

        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/v1/messages", post(ingest_handler))
            .with_state(state.clone());

        if config.admin.enabled {
            router = router.merge(admin::admin_router(state));
        }

        router
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Response to one ingest call: the match decision, plus the alert payload
/// when a keyword matched.
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<AlertPayload>,
}

/// Ingest handler: evaluate one message, dispatch the alert if any.
async fn ingest_handler(
    State(state): State<AppState>,
    Json(message): Json<InboundMessage>,
) -> Json<EvaluateResponse> {
    match state.relay.evaluate(&message).await {
        Some(alert) => {
            state.dispatcher.dispatch(&alert).await;
            Json(EvaluateResponse {
                matched: true,
                keyword: Some(alert.keyword.clone()),
                alert: Some(alert),
            })
        }
        None => Json(EvaluateResponse {
            matched: false,
            keyword: None,
            alert: None,
        }),
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
