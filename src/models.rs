use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, Result};

/// A named binary blob received from the upload form.
#[derive(Debug)]
pub struct UploadRequest {
    name: String,
    content_type: String,
    data: Vec<u8>,
}

impl UploadRequest {
    /// Builds a request from a client-supplied filename.
    ///
    /// Only the last path segment is kept, since some browsers send the full
    /// local path. Names that are empty, `.` or `..` are rejected.
    pub fn new(filename: &str, content_type: Option<&str>, data: Vec<u8>) -> Result<Self> {
        let name = filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or("")
            .trim();

        if name.is_empty() || name == "." || name == ".." {
            return Err(AppError::Validation(format!(
                "Unusable file name: {:?}",
                filename
            )));
        }

        Ok(Self {
            name: name.to_string(),
            content_type: content_type
                .unwrap_or("application/octet-stream")
                .to_string(),
            data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

pub const SUMMARY_MESSAGE: &str = "CLITasker daily task ran successfully.";

/// The record written once per scheduled run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub summary: String,
    pub timestamp: String,
}

impl StatusRecord {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            summary: SUMMARY_MESSAGE.to_string(),
            timestamp: now.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }

    /// Object key for the record of the given day, e.g. `daily-summary/2024-05-01.json`.
    pub fn key_for(now: DateTime<Utc>) -> String {
        format!("daily-summary/{}.json", now.format("%Y-%m-%d"))
    }
}

/// Response shape expected by the scheduled-invocation runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl StatusEnvelope {
    /// `body` carries the message JSON-encoded, so it arrives quoted.
    pub fn new(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: serde_json::Value::String(message.to_string()).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Context handed to the scheduled task alongside the event.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub request_id: String,
}

impl InvocationContext {
    pub fn generate() -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}
