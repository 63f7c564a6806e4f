//! HTTP routes for the analysis server boundary
//!
//! `POST /api/analyze` accepts a multipart upload with a single `audio`
//! field, re-validates it against the same intake rules as the client
//! (client checks can be bypassed), and forwards it to the analyzer.
//! `GET /api/result` reads the transient session result slot.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, warn};

use crate::domain::analysis::ApiResponse;
use crate::domain::audio::{validate_upload, AudioSubmission};

use super::state::ServerState;

/// Build the application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/result", get(latest_result))
        // Size enforcement belongs to the intake rules so oversized uploads
        // get the wire-level error string instead of a bare 413
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// POST /api/analyze - analyze one uploaded audio file
async fn analyze(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> (StatusCode, Json<ApiResponse>) {
    let mut submission: Option<AudioSubmission> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("audio") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field.content_type().unwrap_or("").to_string();

        match field.bytes().await {
            Ok(bytes) => {
                submission = Some(AudioSubmission::new(bytes.to_vec(), mime_type, file_name));
                break;
            }
            Err(e) => {
                warn!("Failed to read audio field: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::failure("Failed to read upload")),
                );
            }
        }
    }

    let Some(submission) = submission else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failure("No audio file provided")),
        );
    };

    if let Err(e) = validate_upload(submission.size_bytes(), submission.mime_type()) {
        return (StatusCode::BAD_REQUEST, Json(ApiResponse::failure(e.to_string())));
    }

    info!(
        file = submission.file_name(),
        mime = submission.mime_type(),
        size = submission.size_bytes(),
        "Analyzing upload"
    );

    match state.analyzer.analyze(&submission).await {
        Ok(result) => {
            state.store_result(result.clone());
            (StatusCode::OK, Json(ApiResponse::ok(result)))
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(e.to_string())),
            )
        }
    }
}

/// GET /api/result - read the transient session result slot
async fn latest_result(State(state): State<ServerState>) -> (StatusCode, Json<ApiResponse>) {
    match state.latest_result() {
        Some(result) => (StatusCode::OK, Json(ApiResponse::ok(result))),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::failure("No analysis available")),
        ),
    }
}
