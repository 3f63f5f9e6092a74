//! REST endpoints

use crate::MAX_UPLOAD_BYTES;
use crate::error::{ApiError, ApiResponse};
use crate::state::AppState;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chart_core::ChartAnalysis;
use chart_vision::{ImageData, Language};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/health", get(health))
        // Generous body limit so the size check below owns the error
        // message instead of a bare 413
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES * 2))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Analyze an uploaded chart image
///
/// Multipart form: `file` (the image) and optional `language` (`th`/`en`).
/// Upload validation happens here; the engine only ever sees a valid image
/// payload.
async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ChartAnalysis>>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut language = Language::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        match name.as_str() {
            "file" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                upload = Some((content_type, bytes.to_vec()));
            }
            "language" => {
                let code = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                language = Language::from_code(&code);
            }
            _ => {}
        }
    }

    let (content_type, bytes) = upload.ok_or(ApiError::MissingFile)?;
    if !content_type.starts_with("image/") {
        return Err(ApiError::NotAnImage);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::FileTooLarge);
    }

    info!(
        media_type = %content_type,
        size = bytes.len(),
        language = %language,
        "analyzing uploaded chart"
    );

    let image = ImageData::from_bytes(content_type, &bytes);
    let image_url = image.to_data_url();

    let analysis = state.analyzer.analyze_image_in(image, &language).await?;

    Ok(Json(ApiResponse::success(analysis.with_image_url(image_url))))
}
