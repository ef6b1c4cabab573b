use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::models::UploadRequest;
use crate::{AppError, AppState, Result};

pub async fn upload_form(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    render_form(&state)
}

pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response> {
    let Some(upload) = read_upload(&state, &mut multipart).await? else {
        tracing::debug!("No file in submission, showing form again");
        return Ok(render_form(&state)?.into_response());
    };

    let bucket = &state.config.s3_bucket;
    let name = upload.name().to_string();
    let content_type = upload.content_type().to_string();
    tracing::info!("Uploading {} to bucket {}", name, bucket);

    state
        .store
        .put_object(bucket, &name, upload.into_data(), &content_type)
        .await?;

    Ok(format!("Uploaded {} to S3 bucket '{}'", name, bucket).into_response())
}

/// Pulls the `file` part out of the form. Returns `None` when the field is
/// missing or was submitted without choosing a file.
async fn read_upload(state: &AppState, multipart: &mut Multipart) -> Result<Option<UploadRequest>> {
    let max_size = state.config.max_upload_size_bytes();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(state, "form field", e))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        if filename.is_empty() {
            return Ok(None);
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(state, "file", e))?;

        if data.len() as u64 > max_size {
            return Err(AppError::FileTooLarge(state.config.max_upload_size_mb));
        }

        return UploadRequest::new(&filename, content_type.as_deref(), data.to_vec()).map(Some);
    }

    Ok(None)
}

/// The body limit surfaces as a multipart read error; report it as 413.
fn multipart_error(state: &AppState, what: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::FileTooLarge(state.config.max_upload_size_mb);
    }

    tracing::error!("Failed to read multipart {}: {}", what, e);
    AppError::Validation(format!("Failed to read {}: {}", what, e))
}

fn render_form(state: &AppState) -> Result<Html<String>> {
    let mut context = tera::Context::new();
    context.insert("bucket", &state.config.s3_bucket);

    let html = state.templates.render("upload.html", &context)?;
    Ok(Html(html))
}
