//! HTTP request handlers

use axum::{
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use subgen_core::{Artifact, ErrorKind, OutputKind, SubgenError, Upload};

use crate::http::page::render_index;
use crate::state::AppState;

pub const MISSING_UPLOAD_MESSAGE: &str = "Please upload a video file first.";

/// HTTP error type
#[derive(Debug)]
pub enum HttpError {
    MissingUpload,
    BadRequest(String),
    Pipeline(SubgenError),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpError::MissingUpload => (StatusCode::BAD_REQUEST, MISSING_UPLOAD_MESSAGE.to_string()),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Pipeline(err) => match err.kind() {
                ErrorKind::InvalidInput => (StatusCode::BAD_REQUEST, err.to_string()),
                ErrorKind::Transcription | ErrorKind::Embedding => {
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
                ErrorKind::Io | ErrorKind::Unexpected => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An error occurred: {}", err),
                ),
            },
        };

        (status, body).into_response()
    }
}

impl From<SubgenError> for HttpError {
    fn from(err: SubgenError) -> Self {
        HttpError::Pipeline(err)
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// The upload page
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_index(state.pipeline.transcriber_name()))
}

/// Accepts the multipart form from the upload page and answers with the
/// generated artifact as a download.
///
/// Fields: `video` (the file) and `output` (`srt` or `video`).
pub async fn generate(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, HttpError> {
    let mut upload = None;
    let mut kind = OutputKind::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::BadRequest(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("video") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| HttpError::BadRequest(e.body_text()))?;

                // Browsers send an empty part when no file was picked
                if !file_name.is_empty() && !bytes.is_empty() {
                    upload = Some(Upload::new(file_name, bytes));
                }
            }
            Some("output") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| HttpError::BadRequest(e.body_text()))?;
                kind = value.parse().map_err(HttpError::BadRequest)?;
            }
            _ => {}
        }
    }

    match state.pipeline.generate(upload, kind).await? {
        Some(artifact) => Ok(artifact_response(artifact)),
        None => Err(HttpError::MissingUpload),
    }
}

fn artifact_response(artifact: Artifact) -> Response {
    (
        [
            (header::CONTENT_TYPE, artifact.mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ),
        ],
        artifact.bytes,
    )
        .into_response()
}
