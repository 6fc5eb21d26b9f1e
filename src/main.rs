//! Bus Registry Backend
//!
//! REST backend for bus driver registration, admin verification and bus route lookup,
//! persisting to JSON collections on disk.

mod api;
mod auth;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::CredentialVerifier;
use config::Config;
use store::{Repository, UploadStore, UPLOADS_ROUTE};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub uploads: Arc<UploadStore>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, repo: Repository) -> Self {
        Self {
            repo: Arc::new(repo),
            uploads: Arc::new(UploadStore::new(&config.uploads_dir)),
            verifier: auth::verifier_from_config(config.admin_token.as_deref()),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Bus Registry Backend");
    tracing::info!("Data directory: {:?}", config.data_dir);
    tracing::info!("Uploads directory: {:?}", config.uploads_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_token.is_none() {
        tracing::warn!(
            "No admin token configured (BUS_ADMIN_TOKEN). Admin routes will reject every request!"
        );
    }

    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    let repo = Repository::open(&config.drivers_path(), &config.buses_path());
    let bind_addr = config.bind_addr;
    let state = AppState::new(config, repo);

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let verifier = state.verifier.clone();

    // Admin routes
    let admin_routes = Router::new()
        .route(
            "/pending-verifications",
            get(api::list_pending_verifications),
        )
        .route("/verifications", get(api::list_verifications))
        .route("/approve-verification", post(api::approve_verification))
        .route("/reject-verification", post(api::reject_verification))
        // Apply bearer auth before any extractor runs
        .route_layer(middleware::from_fn(move |req, next| {
            auth::admin_auth_layer(verifier.clone(), req, next)
        }));

    // Public routes
    let public_routes = Router::new()
        // Drivers
        .route("/bus-register", post(api::register_driver))
        .route("/bus-driver-status", get(api::get_driver_status))
        .route("/notify-login", post(api::notify_login))
        // Buses
        .route("/bus/add", post(api::add_bus))
        .route("/bus/list", get(api::list_buses))
        .route("/bus/delete", delete(api::delete_bus))
        .route("/bus/search", get(api::search_buses))
        // Health check
        .route("/health", get(health_check));

    let mut router = Router::new()
        .nest("/admin", admin_routes)
        .merge(public_routes)
        .nest_service(
            &format!("/{}", UPLOADS_ROUTE),
            ServeDir::new(state.uploads.dir()),
        );

    if let Some(static_dir) = &state.config.static_dir {
        tracing::info!("Serving client assets from {:?}", static_dir);
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    router
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
