//! Service initialization: repositories, media tools and the shared state.

use crate::auth::JwtService;
use crate::state::{AppState, MediaTools, StorageTargets};
use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::{FfmpegNormalizer, FfprobeInspector};

/// Build the ffprobe/ffmpeg wrappers from configuration
pub fn setup_media_tools(config: &Config) -> Result<MediaTools> {
    let timeout = Duration::from_secs(config.media_tool_timeout_secs());
    let inspector =
        FfprobeInspector::new(config.ffprobe_path(), timeout).context("Invalid FFPROBE_PATH")?;
    let normalizer =
        FfmpegNormalizer::new(config.ffmpeg_path(), timeout).context("Invalid FFMPEG_PATH")?;

    Ok(MediaTools {
        inspector: Arc::new(inspector),
        normalizer: Arc::new(normalizer),
    })
}

/// Assemble the application state
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: StorageTargets,
) -> Result<Arc<AppState>> {
    let media = setup_media_tools(config)?;

    Ok(Arc::new(AppState {
        config: config.clone(),
        videos: Arc::new(VideoRepository::new(pool)),
        jwt: JwtService::new(config.jwt_secret()),
        storage,
        media,
    }))
}
