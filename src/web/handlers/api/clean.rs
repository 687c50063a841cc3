//! Upload endpoint for Word-exported HTML

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tokio::task;

use crate::core::{clean_word_html, CleanError};
use crate::web::types::{AppState, ErrorResponse};

const FILE_FIELD_NAME: &str = "file";
const NO_FILE_UPLOADED: &str = "No file uploaded.";

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, error: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(error)))
}

/// Cleans the HTML document sent as the `file` part of a multipart form
///
/// Responds with the cleaned document as `text/html; charset=utf-8`.
pub async fn clean_word_html_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_response(e.status(), e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD_NAME) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("<unnamed>").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| error_response(e.status(), e.body_text()))?;
        upload = Some((file_name, data));
        break;
    }

    let Some((file_name, data)) = upload.filter(|(_, data)| !data.is_empty()) else {
        return Err(error_response(StatusCode::BAD_REQUEST, NO_FILE_UPLOADED));
    };

    tracing::info!(file = %file_name, bytes = data.len(), "cleaning uploaded document");

    let options = state.clean_options.clone();
    let result = task::spawn_blocking(move || clean_word_html(&data, &options))
        .await
        .map_err(|e| {
            tracing::error!("cleaning task failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Task failed: {e}"),
            )
        })?;

    match result {
        Ok(html) => Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response()),
        Err(e) => {
            tracing::warn!(file = %file_name, "cleaning failed: {}", e);
            Err(error_response(status_for(&e), e.to_string()))
        }
    }
}

fn status_for(error: &CleanError) -> StatusCode {
    match error {
        CleanError::Input => StatusCode::BAD_REQUEST,
        CleanError::Parse(_) | CleanError::UnknownEncoding(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CleanError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
