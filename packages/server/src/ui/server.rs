//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use kaigi_shared::time::SystemClock;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::{
    handler::{
        create_room, debug_live_rooms, debug_room_connections, end_room, get_messages,
        get_participants, health_check, join_room, leave_room, send_message, update_attention,
        update_media_state, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Room coordination server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Create a server backed by in-memory stores and the system clock
    pub fn new(config: ServerConfig) -> Self {
        let state = Arc::new(AppState::in_memory(&config, Arc::new(SystemClock)));
        Self::with_state(config, state)
    }

    /// Create a server with pre-wired state (tests inject a fixed clock here)
    pub fn with_state(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/room/{room_id}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", post(create_room))
            .route("/api/rooms/{room_id}/join", post(join_room))
            .route("/api/rooms/{room_id}/leave", post(leave_room))
            .route("/api/rooms/{room_id}/end", post(end_room))
            .route("/api/rooms/{room_id}/participants", get(get_participants))
            .route(
                "/api/rooms/{room_id}/messages",
                get(get_messages).post(send_message),
            )
            .route("/api/rooms/{room_id}/attention", post(update_attention))
            .route("/api/rooms/{room_id}/media", post(update_media_state))
            // デバッグ用エンドポイント
            .route("/debug/rooms", get(debug_live_rooms))
            .route(
                "/debug/rooms/{room_id}/connections",
                get(debug_room_connections),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Room coordination server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws/room/{{room_id}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
