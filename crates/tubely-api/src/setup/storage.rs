//! Storage setup and initialization

use crate::state::StorageTargets;
use anyhow::{Context, Result};
use tubely_core::Config;
use tubely_storage::create_storage;

/// Build the thumbnail and video publication targets
pub async fn setup_storage(config: &Config) -> Result<StorageTargets> {
    tracing::info!("Initializing storage backends...");

    let thumbnails = create_storage(config, config.thumbnail_storage_backend())
        .await
        .context("Failed to initialize thumbnail storage")?;
    let videos = create_storage(config, config.video_storage_backend())
        .await
        .context("Failed to initialize video storage")?;

    tracing::info!(
        thumbnails = %thumbnails.backend_type(),
        videos = %videos.backend_type(),
        "Storage backends initialized successfully"
    );

    Ok(StorageTargets { thumbnails, videos })
}
