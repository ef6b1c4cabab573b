use clitasker::storage::{build_s3_client, S3ObjectStore};
use clitasker::{create_router, load_templates, AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let templates = load_templates()?;

    let s3_client = build_s3_client(config.s3_endpoint_url.as_deref()).await;

    let state = Arc::new(AppState {
        config: config.clone(),
        templates,
        store: Arc::new(S3ObjectStore::new(s3_client)),
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
