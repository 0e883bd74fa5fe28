//! Container remux for progressive playback.

use crate::command::{run_tool, validate_path};
use crate::error::ProcessingResult;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;
use tempfile::TempPath;

/// Rewrites a staged video so its index precedes the media data
#[async_trait]
pub trait MediaNormalizer: Send + Sync {
    /// Produce a normalized copy of `input`. The returned file is removed when dropped.
    async fn normalize(&self, input: &Path) -> ProcessingResult<TempPath>;
}

/// [`MediaNormalizer`] that remuxes with `ffmpeg -movflags faststart` (no re-encode)
pub struct FfmpegNormalizer {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegNormalizer {
    pub fn new(ffmpeg_path: impl Into<String>, timeout: Duration) -> ProcessingResult<Self> {
        let ffmpeg_path = ffmpeg_path.into();
        validate_path(Path::new(&ffmpeg_path))?;
        Ok(Self {
            ffmpeg_path,
            timeout,
        })
    }
}

/// Reserve a uniquely named output file next to `input`
fn output_path_for(input: &Path) -> ProcessingResult<TempPath> {
    let dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file = tempfile::Builder::new()
        .prefix("tubely-faststart-")
        .suffix(".mp4")
        .tempfile_in(dir)?;
    Ok(file.into_temp_path())
}

#[async_trait]
impl MediaNormalizer for FfmpegNormalizer {
    #[tracing::instrument(skip(self), fields(
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn normalize(&self, input: &Path) -> ProcessingResult<TempPath> {
        validate_path(input)?;
        let output = output_path_for(input)?;

        run_tool(
            &self.ffmpeg_path,
            [
                OsStr::new("-y"),
                OsStr::new("-i"),
                input.as_os_str(),
                OsStr::new("-c"),
                OsStr::new("copy"),
                OsStr::new("-movflags"),
                OsStr::new("faststart"),
                OsStr::new("-f"),
                OsStr::new("mp4"),
                output.as_os_str(),
            ],
            self.timeout,
        )
        .await?;

        tracing::debug!(output = %output.display(), "Fast-start remux completed");

        Ok(output)
    }
}
