//! Daily summary task
//!
//! Writes a small status record to `daily-summary/<date>.json` each time the
//! scheduler invokes it. Runs on the same UTC date overwrite one another.
//! A failed write is returned to the caller rather than reported as success.

use chrono::{DateTime, Utc};
use std::process::ExitCode;
use thiserror::Error;

use crate::models::{InvocationContext, StatusEnvelope, StatusRecord};
use crate::{AppError, ObjectStore};

pub const SUCCESS_MESSAGE: &str = "CLITasker daily task executed successfully!";

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Invalid invocation event: {0}")]
    Event(serde_json::Error),

    #[error("Failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to upload summary: {0}")]
    Upload(String),
}

impl SummaryError {
    pub fn to_envelope(&self) -> StatusEnvelope {
        let status_code = match self {
            SummaryError::Event(_) => 400,
            _ => 500,
        };
        StatusEnvelope::new(status_code, &self.to_string())
    }
}

/// Where a successful run put its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    pub bucket: String,
    pub key: String,
    pub record: StatusRecord,
}

pub async fn write_daily_summary(
    store: &dyn ObjectStore,
    bucket: &str,
    now: DateTime<Utc>,
) -> Result<SummaryOutcome, SummaryError> {
    let record = StatusRecord::at(now);
    tracing::info!("Daily summary task ran at {}", record.timestamp);

    let key = StatusRecord::key_for(now);
    let body = serde_json::to_vec(&record)?;

    if let Err(e) = store
        .put_object(bucket, &key, body, "application/json")
        .await
    {
        let err = SummaryError::Upload(match e {
            AppError::Storage(msg) => msg,
            other => other.to_string(),
        });
        tracing::error!("{}", err);
        return Err(err);
    }

    tracing::info!("Uploaded summary to s3://{}/{}", bucket, key);
    Ok(SummaryOutcome {
        bucket: bucket.to_string(),
        key,
        record,
    })
}

/// Entry point for the scheduler. The event carries nothing the task uses.
pub async fn handle_invocation(
    store: &dyn ObjectStore,
    bucket: &str,
    _event: &serde_json::Value,
    context: &InvocationContext,
    now: DateTime<Utc>,
) -> Result<StatusEnvelope, SummaryError> {
    tracing::debug!("Handling invocation {}", context.request_id);

    write_daily_summary(store, bucket, now).await?;
    Ok(StatusEnvelope::new(200, SUCCESS_MESSAGE))
}

/// What the task binary prints and exits with.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub envelope: StatusEnvelope,
}

impl RunReport {
    pub fn exit_code(&self) -> ExitCode {
        if self.envelope.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Parses the raw event (`{}` when absent) and runs one invocation.
/// A malformed event is rejected before anything is written.
pub async fn run(
    store: &dyn ObjectStore,
    bucket: &str,
    raw_event: Option<&str>,
    context: &InvocationContext,
    now: DateTime<Utc>,
) -> RunReport {
    let event = match raw_event {
        Some(raw) => serde_json::from_str(raw).map_err(SummaryError::Event),
        None => Ok(serde_json::json!({})),
    };

    let result = match event {
        Ok(event) => handle_invocation(store, bucket, &event, context, now).await,
        Err(e) => {
            tracing::error!("{}", e);
            Err(e)
        }
    };

    RunReport {
        envelope: result.unwrap_or_else(|e| e.to_envelope()),
    }
}
