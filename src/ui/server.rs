//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handler::{
        create_interview, delete_session, execute_code, get_interview, health_check,
        list_sessions, session_detail, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Collaborative interview server.
///
/// Wraps the shared state and exposes the combined HTTP + WebSocket router.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state);
/// server.run("127.0.0.1".to_string(), 5000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router. Exposed separately so tests can serve it on an
    /// ephemeral port.
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/execute", post(execute_code))
            .route("/api/interviews", post(create_interview))
            .route("/api/interviews/{id}", get(get_interview))
            .route("/api/sessions", get(list_sessions))
            .route("/api/sessions/{id}", delete(delete_session))
            .route("/api/sessions/{id}/details", get(session_detail))
            .layer(self.cors_layer())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// The frontend is served from a different origin than the API, so its
    /// browser requests need CORS headers naming that origin.
    fn cors_layer(&self) -> CorsLayer {
        let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        match self.state.base_url.parse::<HeaderValue>() {
            Ok(origin) => cors.allow_origin(origin),
            Err(e) => {
                tracing::warn!(
                    "invalid base_url '{}' for CORS origin: {}",
                    self.state.base_url,
                    e
                );
                cors
            }
        }
    }

    /// Run the server until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Interview server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
