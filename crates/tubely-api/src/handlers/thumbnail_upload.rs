use crate::auth::authorize_video_owner;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::{publish_asset, stage_upload, Publication, UploadPolicy};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tubely_core::models::{AssetKind, Video};
use tubely_core::AppError;
use tubely_storage::{extension_for_content_type, AssetKey};

/// Multipart field carrying the image
pub const THUMBNAIL_FIELD: &str = "thumbnail";

#[utoipa::path(
    post,
    path = "/api/videos/{videoID}/thumbnail",
    tag = "videos",
    params(
        ("videoID" = String, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Form with a `thumbnail` file part (image/jpg or image/png by default)"),
    responses(
        (status = 200, description = "Thumbnail stored; returns the updated video", body = Video),
        (status = 400, description = "Invalid ID, unknown video, or invalid file", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or not the video owner", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, headers, multipart))]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video = authorize_video_owner(&video_id, &headers, &state.jwt, state.videos.as_ref())
        .await?;
    let mut multipart = multipart?;

    let config = &state.config;
    let policy = UploadPolicy {
        field_name: THUMBNAIL_FIELD,
        label: "thumbnail",
        allowed_content_types: config.thumbnail_allowed_content_types(),
        max_bytes: config.max_thumbnail_size_bytes(),
        verify_magic_bytes: config.verify_magic_bytes(),
    };
    let staged = stage_upload(&mut multipart, &policy, config.upload_temp_dir()).await?;

    let extension = extension_for_content_type(&staged.content_type).ok_or_else(|| {
        AppError::BadRequest(format!("Unsupported content type {}", staged.content_type))
    })?;
    let key = AssetKey::generate(&extension, None);

    let updated = publish_asset(
        state.storage.thumbnails.as_ref(),
        state.videos.as_ref(),
        Publication {
            video_id: video.id,
            kind: AssetKind::Thumbnail,
            key: &key,
            content_type: &staged.content_type,
        },
        &staged.path,
    )
    .await?;

    tracing::info!(
        video_id = %video.id,
        size_bytes = staged.size,
        "Thumbnail uploaded"
    );

    Ok(Json(updated))
}
