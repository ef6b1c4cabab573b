use axum::extract::State;
use std::sync::Arc;

use crate::{db, AppState, Result};

pub async fn db_check(State(state): State<Arc<AppState>>) -> Result<String> {
    let version = db::fetch_version(&state.config).await?;
    tracing::info!("Database probe succeeded");

    Ok(format!("Connected to PostgreSQL DB! Version: {}", version))
}
