//! Stream geometry via ffprobe and orientation classification.

use crate::command::{run_tool, validate_path};
use crate::error::{ProcessingError, ProcessingResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;
use tubely_core::models::Orientation;

/// Inspects a staged media file and classifies its orientation
#[async_trait]
pub trait MediaInspector: Send + Sync {
    async fn orientation(&self, path: &Path) -> ProcessingResult<Orientation>;
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Width and height of the first video stream in ffprobe JSON output
pub fn parse_probe_output(stdout: &[u8]) -> ProcessingResult<(u32, u32)> {
    let probe: ProbeOutput = serde_json::from_slice(stdout)
        .map_err(|e| ProcessingError::InvalidOutput(format!("ffprobe JSON: {}", e)))?;

    let stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| ProcessingError::NoVideoStream("no video stream found".to_string()))?;

    match (stream.width, stream.height) {
        (Some(w), Some(h)) if h > 0 => Ok((w, h)),
        _ => Err(ProcessingError::NoVideoStream(
            "video stream has no usable dimensions".to_string(),
        )),
    }
}

/// Classify width/height into an orientation bucket.
///
/// Both bands are open intervals: 16:9 lands in (1.7, 1.8) and 9:16 in (0.5, 0.6).
pub fn classify_ratio(width: u32, height: u32) -> ProcessingResult<Orientation> {
    if height == 0 {
        return Err(ProcessingError::NoVideoStream(
            "video stream height is zero".to_string(),
        ));
    }
    let ratio = f64::from(width) / f64::from(height);
    let orientation = if ratio > 1.7 && ratio < 1.8 {
        Orientation::Landscape
    } else if ratio > 0.5 && ratio < 0.6 {
        Orientation::Portrait
    } else {
        Orientation::Other
    };
    Ok(orientation)
}

/// [`MediaInspector`] backed by the ffprobe binary
pub struct FfprobeInspector {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeInspector {
    pub fn new(ffprobe_path: impl Into<String>, timeout: Duration) -> ProcessingResult<Self> {
        let ffprobe_path = ffprobe_path.into();
        validate_path(Path::new(&ffprobe_path))?;
        Ok(Self {
            ffprobe_path,
            timeout,
        })
    }
}

#[async_trait]
impl MediaInspector for FfprobeInspector {
    #[tracing::instrument(skip(self), fields(
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn orientation(&self, path: &Path) -> ProcessingResult<Orientation> {
        validate_path(path)?;

        let output = run_tool(
            &self.ffprobe_path,
            [
                OsStr::new("-v"),
                OsStr::new("error"),
                OsStr::new("-print_format"),
                OsStr::new("json"),
                OsStr::new("-show_streams"),
                path.as_os_str(),
            ],
            self.timeout,
        )
        .await?;

        let (width, height) = parse_probe_output(&output.stdout)?;
        let orientation = classify_ratio(width, height)?;

        tracing::info!(
            width = width,
            height = height,
            orientation = %orientation,
            "Video probe completed"
        );

        Ok(orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANDSCAPE_PROBE: &str = r#"{
        "streams": [
            {"index": 0, "codec_name": "aac", "codec_type": "audio", "sample_rate": "48000"},
            {"index": 1, "codec_name": "h264", "codec_type": "video", "width": 1920, "height": 1080}
        ]
    }"#;

    #[test]
    fn test_parse_picks_first_video_stream() {
        assert_eq!(
            parse_probe_output(LANDSCAPE_PROBE.as_bytes()).unwrap(),
            (1920, 1080)
        );
    }

    #[test]
    fn test_parse_without_video_stream() {
        let json = r#"{"streams": [{"codec_type": "audio"}]}"#;
        assert!(matches!(
            parse_probe_output(json.as_bytes()),
            Err(ProcessingError::NoVideoStream(_))
        ));
        assert!(matches!(
            parse_probe_output(b"{}"),
            Err(ProcessingError::NoVideoStream(_))
        ));
    }

    #[test]
    fn test_parse_zero_height() {
        let json = r#"{"streams": [{"codec_type": "video", "width": 640, "height": 0}]}"#;
        assert!(matches!(
            parse_probe_output(json.as_bytes()),
            Err(ProcessingError::NoVideoStream(_))
        ));
    }

    #[test]
    fn test_parse_garbage_is_invalid_output() {
        assert!(matches!(
            parse_probe_output(b"moov atom not found"),
            Err(ProcessingError::InvalidOutput(_))
        ));
    }

    #[test]
    fn test_classify_common_geometries() {
        assert_eq!(classify_ratio(1920, 1080).unwrap(), Orientation::Landscape);
        assert_eq!(classify_ratio(1280, 720).unwrap(), Orientation::Landscape);
        assert_eq!(classify_ratio(1080, 1920).unwrap(), Orientation::Portrait);
        assert_eq!(classify_ratio(1000, 1000).unwrap(), Orientation::Other);
        assert_eq!(classify_ratio(640, 480).unwrap(), Orientation::Other);
    }

    #[test]
    fn test_classify_bounds_are_exclusive() {
        // 17:10 and 18:10 sit exactly on the landscape band edges
        assert_eq!(classify_ratio(1700, 1000).unwrap(), Orientation::Other);
        assert_eq!(classify_ratio(1800, 1000).unwrap(), Orientation::Other);
        assert_eq!(classify_ratio(500, 1000).unwrap(), Orientation::Other);
        assert_eq!(classify_ratio(600, 1000).unwrap(), Orientation::Other);
    }

    #[test]
    fn test_classify_zero_height() {
        assert!(classify_ratio(1920, 0).is_err());
    }

    #[test]
    fn test_rejects_unsafe_binary_path() {
        assert!(FfprobeInspector::new("ffprobe; rm -rf /", Duration::from_secs(1)).is_err());
        assert!(FfprobeInspector::new("/usr/bin/ffprobe", Duration::from_secs(1)).is_ok());
    }
}
