//! Scheduled entry point for the daily summary.
//!
//! Meant to be run by an external timer (cron, EventBridge, a container
//! scheduler). The optional first argument is the invocation event as JSON.
//! The status envelope is printed to stdout and the exit code is non-zero
//! when the summary could not be stored.

use chrono::Utc;
use clitasker::models::InvocationContext;
use clitasker::storage::{build_s3_client, S3ObjectStore};
use clitasker::summary;
use clitasker::SummaryConfig;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let raw_event = std::env::args().nth(1);
    let config = SummaryConfig::from_env()?;
    let store = S3ObjectStore::new(build_s3_client(config.s3_endpoint_url.as_deref()).await);
    let context = InvocationContext::generate();

    let report = summary::run(
        &store,
        &config.s3_bucket,
        raw_event.as_deref(),
        &context,
        Utc::now(),
    )
    .await;

    println!("{}", serde_json::to_string(&report.envelope)?);
    Ok(report.exit_code())
}
