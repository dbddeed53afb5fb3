//! Axum route handlers for document upload.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text_blocking, mime_from_filename};
use crate::state::AppState;

/// Multipart field that carries the uploaded document.
pub const DOCUMENT_FIELD: &str = "document";

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub filename: String,
    pub mime_type: String,
    pub size: usize,
    pub extracted_text: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub data: UploadedDocument,
}

/// POST /api/files/upload
///
/// Reads the `document` part, extracts its text and returns it so the client
/// can pass it back as `extractedText` to the generate endpoint.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let limit = state.config.max_upload_bytes;
    let mut multipart = multipart.map_err(|e| AppError::InvalidFileField(e.body_text()))?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
        .ok_or_else(|| {
            AppError::InvalidFileField(format!(
                "No file uploaded. Expected file field name: {DOCUMENT_FIELD}"
            ))
        })?;

    if field.name() != Some(DOCUMENT_FIELD) {
        return Err(AppError::InvalidFileField(format!(
            "Expected file field name: {DOCUMENT_FIELD}"
        )));
    }

    let filename = field.file_name().unwrap_or(DOCUMENT_FIELD).to_string();
    let mime_type = match field.content_type() {
        Some(declared) if declared != OCTET_STREAM => declared.to_string(),
        _ => mime_from_filename(&filename)
            .unwrap_or(OCTET_STREAM)
            .to_string(),
    };

    let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
    let size = bytes.len();
    info!("Extracting text from '{filename}' ({mime_type}, {size} bytes)");

    let extracted_text = extract_text_blocking(bytes, mime_type.clone()).await?;
    info!(
        "Extracted {} chars from '{filename}'",
        extracted_text.chars().count()
    );

    Ok(Json(UploadResponse {
        success: true,
        message: "File uploaded and processed successfully".to_string(),
        data: UploadedDocument {
            filename,
            mime_type,
            size,
            extracted_text,
        },
    }))
}

fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge(format!("File size must be less than {limit} bytes"))
    } else {
        AppError::Validation(err.body_text())
    }
}
