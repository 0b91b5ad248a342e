//! Site Split API Server implementation
//!
//! HTTP server using Axum. One export per request, each on its own copy of
//! the template.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handlers;
use crate::config::ExportConfig;
use crate::export::SiteSplitExporter;

/// API Server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    /// Dashboard files served at `/` and as fallback routes
    pub static_dir: Option<PathBuf>,
    pub export: ExportConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            allowed_origins: Vec::new(),
            static_dir: None,
            export: ExportConfig::default(),
        }
    }
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub version: String,
    pub exporter: SiteSplitExporter,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(export: ExportConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exporter: SiteSplitExporter::new(export),
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, static_dir: Option<PathBuf>) -> Self {
        self.static_dir = static_dir;
        self
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Build the router; separate from [`run_api_server`] so tests can drive it
pub fn router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let static_dir = state.static_dir.clone();
    let mut app = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/ping", get(handlers::ping))
        .route("/api/download-template", post(handlers::download_template))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "site_split=info,tower_http=info".into()),
        )
        .init();

    let state = Arc::new(
        AppState::new(config.export.clone()).with_static_dir(config.static_dir.clone()),
    );
    if !state.exporter.template_exists() {
        warn!(
            template = %config.export.template_path.display(),
            "template file is missing; exports will answer 404 until it exists"
        );
    }

    let app = router(state, &config.allowed_origins);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Site Split API Server starting on http://{}", addr);
    info!("   Endpoints: POST /api/download-template, GET /api/ping, GET /health");
    if config.allowed_origins.is_empty() {
        info!("   CORS: any origin");
    } else {
        info!("   CORS origins: {:?}", config.allowed_origins);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Site Split API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
