//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::{Context, Result};
use tubely_core::{Config, StorageBackend};

/// Validate configuration and prepare the staging directory
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production()
        && config.thumbnail_storage_backend() == StorageBackend::Local
        && config.assets_base_url().contains("localhost")
    {
        tracing::warn!(
            assets_base_url = %config.assets_base_url(),
            "Thumbnail URLs point at localhost in production - set ASSETS_BASE_URL"
        );
    }

    if config.video_storage_backend() == StorageBackend::S3 && config.s3_distribution_url().is_none()
    {
        tracing::info!("S3_DISTRIBUTION_URL not set - video URLs will point at the bucket");
    }

    std::fs::create_dir_all(config.upload_temp_dir()).with_context(|| {
        format!(
            "Failed to create upload staging directory {}",
            config.upload_temp_dir().display()
        )
    })?;

    Ok(())
}
