//! Moves finished bytes to their permanent store and records the URL on the video.

use crate::error::HttpAppError;
use std::path::Path;
use tubely_core::models::{AssetKind, Video};
use tubely_core::AppError;
use tubely_db::VideoStore;
use tubely_storage::{AssetKey, Storage};
use uuid::Uuid;

/// Where a published asset goes and what it is
pub struct Publication<'a> {
    pub video_id: Uuid,
    pub kind: AssetKind,
    pub key: &'a AssetKey,
    pub content_type: &'a str,
}

/// Store `source` under the publication key, then set the matching URL field on the video.
///
/// The record is re-read before the write so the other asset field is not clobbered by a
/// stale copy. A stored object is left in place if the record update fails.
#[tracing::instrument(skip(storage, videos, publication, source), fields(
    video_id = %publication.video_id,
    kind = %publication.kind,
    key = %publication.key,
))]
pub async fn publish_asset(
    storage: &dyn Storage,
    videos: &dyn VideoStore,
    publication: Publication<'_>,
    source: &Path,
) -> Result<Video, HttpAppError> {
    let url = storage
        .put_file(
            publication.key.as_str(),
            source,
            publication.content_type,
        )
        .await?;

    let mut video = videos.get_video(publication.video_id).await?.ok_or_else(|| {
        AppError::Internal(format!(
            "Video {} disappeared before its {} URL could be recorded",
            publication.video_id, publication.kind
        ))
    })?;

    video.set_asset_url(publication.kind, url);

    let updated = videos.update_video(&video).await?.ok_or_else(|| {
        AppError::Internal(format!(
            "Video {} disappeared while recording its {} URL",
            publication.video_id, publication.kind
        ))
    })?;

    tracing::info!(
        backend = %storage.backend_type(),
        "Asset published"
    );

    Ok(updated)
}
