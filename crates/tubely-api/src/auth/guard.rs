//! Identity and ownership checks shared by the upload handlers.

use crate::auth::jwt::JwtService;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use tubely_core::models::Video;
use tubely_core::AppError;
use tubely_db::VideoStore;
use uuid::Uuid;

/// Bearer token from the `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("Couldn't find JWT".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthenticated("Couldn't find JWT".to_string()))?;

    Ok(token)
}

/// Resolve the video named in the path and check the caller owns it.
///
/// Checks run in a fixed order: id syntax, credential presence, credential validity,
/// existence, then ownership. Returns the loaded record.
#[tracing::instrument(skip(headers, jwt, videos))]
pub async fn authorize_video_owner(
    raw_video_id: &str,
    headers: &HeaderMap,
    jwt: &JwtService,
    videos: &dyn VideoStore,
) -> Result<Video, AppError> {
    let video_id = Uuid::parse_str(raw_video_id)
        .map_err(|_| AppError::BadRequest("Invalid ID".to_string()))?;

    let token = bearer_token(headers)?;
    let user_id = jwt.verify(token)?;

    let video = videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Unable to get video by videoID".to_string()))?;

    if !video.is_owned_by(user_id) {
        tracing::debug!(%video_id, %user_id, "Upload rejected for non-owner");
        return Err(AppError::Forbidden(
            "User unauthorized for current video".to_string(),
        ));
    }

    Ok(video)
}
