//! API Server - HTTP server for the classifier page and JSON API

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use phish_rs::config::Config;
use phish_rs::EmailClassifier;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::handlers::{self, AppState};
use crate::api::web;

/// API Server configuration
pub struct ApiServer {
    state: Arc<AppState>,
    addr: String,
    max_body_bytes: usize,
}

impl ApiServer {
    /// Create a new API server around a ready classifier
    pub fn new(classifier: EmailClassifier, dimension: usize, config: &Config) -> Self {
        let state = Arc::new(AppState {
            classifier,
            ui: config.ui.clone(),
            dimension,
        });

        Self {
            state,
            addr: config.server.listen_addr.clone(),
            max_body_bytes: config.server.max_body_bytes,
        }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let api_routes = Router::new().route("/classify", post(handlers::classify));

        Router::new()
            .route("/", get(web::index).post(web::classify_form))
            .route("/health", get(handlers::health))
            .nest("/api", api_routes)
            .layer(DefaultBodyLimit::max(self.max_body_bytes))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the server and run until Ctrl+C or SIGTERM
    pub async fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(&self.addr).await?;
        info!("Starting web server on {}", listener.local_addr()?);

        self.serve(listener, shutdown_signal()).await?;

        info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}

/// Wait for SIGTERM or SIGINT (Ctrl+C)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
