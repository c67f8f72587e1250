mod config;
mod db;
mod domain;
mod error;
mod routes;
mod state;
mod storage;
mod templates;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tigertrack=info,tower_http=info".into()),
        )
        .init();

    let config = config::Config::from_env()?;
    let config = Arc::new(config);

    storage::ensure_dirs(&config.upload_folder)?;

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(pool.as_ref()).await?;

    let state = Arc::new(state::AppState {
        pool,
        config: config.clone(),
    });

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/report/lost", get(routes::lost_form))
        .route("/report/found", get(routes::found_form))
        .route("/admin", get(routes::admin_dashboard))
        .route("/api/lost", post(routes::submit_lost).get(routes::list_lost))
        .route("/api/found", post(routes::submit_found).get(routes::list_found))
        .route("/api/lost/:id", delete(routes::delete_lost))
        .route("/api/found/:id", delete(routes::delete_found))
        .route("/api/solved", get(routes::list_solved))
        .route("/api/solved/:id/claim", post(routes::mark_claimed))
        .route("/api/solved/:id/restore", post(routes::restore_solved))
        .route("/api/archives", get(routes::list_archives))
        .route("/api/archives/:id/restore", post(routes::restore_archive))
        .route("/api/archives/donate", post(routes::donate))
        .route("/api/match", post(routes::confirm_match))
        .route("/api/dashboard", get(routes::dashboard))
        .route("/api/admin/login", post(routes::admin_login))
        .route("/uploads/:filename", get(routes::photo))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("TigerTrack listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
