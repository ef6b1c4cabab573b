pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod storage;
pub mod summary;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use config::{Config, SummaryConfig};
pub use error::{AppError, Result};
pub use storage::ObjectStore;

pub struct AppState {
    pub config: Config,
    pub templates: tera::Tera,
    pub store: Arc<dyn ObjectStore>,
}

/// Compiles the HTML templates shipped with the binary.
pub fn load_templates() -> std::result::Result<tera::Tera, tera::Error> {
    let mut templates = tera::Tera::default();
    templates.add_raw_template("upload.html", include_str!("../templates/upload.html"))?;
    Ok(templates)
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_request_body_bytes();

    Router::new()
        .route("/", get(handlers::home))
        .route("/db", get(handlers::db_check::db_check))
        .route(
            "/upload",
            get(handlers::upload::upload_form).post(handlers::upload::upload_file),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
